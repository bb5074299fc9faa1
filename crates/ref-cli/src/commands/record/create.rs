use ref_core::RecordFields;
use ref_core::responses::RecordMutationResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FieldArgs;
use crate::commands::shared::fields::{overlay, positioned};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &FieldArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_loaded()?;
    let fields = overlay(RecordFields::default(), args);

    let record = ctx.service.create(fields).await?;
    let position = ctx.service.records().len() - 1;

    output(
        &RecordMutationResponse {
            record: positioned(position, &record),
        },
        flags.format,
    )
}
