use anyhow::Context;
use ref_core::responses::RecordMutationResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FieldArgs;
use crate::commands::shared::fields::{any_given, overlay, positioned};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    position: usize,
    args: &FieldArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_loaded()?;
    if !any_given(args) {
        anyhow::bail!("at least one field flag (--title, --keywords, ...) must be provided");
    }

    let current = ctx
        .service
        .records()
        .get(position)
        .with_context(|| format!("no record at position {position}"))?;
    let fields = overlay(current.fields.clone(), args);

    let record = ctx.service.update_at(position, fields).await?;
    output(
        &RecordMutationResponse {
            record: positioned(position, &record),
        },
        flags.format,
    )
}
