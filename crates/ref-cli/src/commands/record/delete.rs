use ref_core::responses::RecordDeleteResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    position: usize,
    yes: bool,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_loaded()?;
    let Some(target) = ctx.service.records().get(position) else {
        anyhow::bail!("no record at position {position}");
    };
    if !yes {
        anyhow::bail!(
            "deleting '{}' at position {position} cannot be undone; re-run with --yes to confirm",
            target.fields.title
        );
    }

    let deleted = ctx.service.delete_at(position).await?;
    output(
        &RecordDeleteResponse {
            deleted: deleted.record,
            position: deleted.position,
            remaining: ctx.service.records().len(),
        },
        flags.format,
    )
}
