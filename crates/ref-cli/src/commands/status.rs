use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `refs status`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = ctx.service.store().status();
    output(&status, flags.format)?;
    if let Some(error) = &ctx.load_error {
        eprintln!("last load failed: {error}");
    }
    Ok(())
}
