use ref_core::responses::RecordListResponse;

use crate::cli::GlobalFlags;
use crate::commands::shared::fields::positioned;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output_records;

/// Handle `refs list`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    let all = ctx.service.records();

    let response = RecordListResponse {
        records: all
            .iter()
            .enumerate()
            .take(limit)
            .map(|(position, record)| positioned(position, record))
            .collect(),
        total_records: all.len(),
    };
    output_records(&response, &response.records, flags.format)
}
