use ref_core::responses::SearchResultsResponse;
use ref_search::SearchQuery;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::fields::positioned;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output_records;

/// Handle `refs search`.
pub fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let case_sensitive = args.case_sensitive(ctx.config.general.case_sensitive);
    let query = SearchQuery::parse(&args.column, args.term.as_str(), case_sensitive)?;
    let limit = effective_limit(args.limit, flags.limit, ctx.config.general.default_limit);

    let hits = ctx.service.search(&query);
    let total_results = hits.len();
    let results = hits
        .into_iter()
        .take(limit)
        .map(|(position, record)| positioned(position, record))
        .collect::<Vec<_>>();

    let response = SearchResultsResponse {
        column: query.column(),
        term: query.term().to_string(),
        case_sensitive: query.case_sensitive(),
        results,
        total_results,
    };
    output_records(&response, &response.results, flags.format)?;

    if total_results > response.results.len() && !flags.quiet {
        eprintln!("showing {} of {total_results} results (use --limit for more)", response.results.len());
    }
    Ok(())
}
