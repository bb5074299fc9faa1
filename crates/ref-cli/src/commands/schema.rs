use ref_core::Record;
use ref_core::responses::{
    RecordDeleteResponse, RecordListResponse, RecordMutationResponse, SearchResultsResponse,
    StoreStatusResponse,
};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};

/// Handle `refs schema`. Always prints JSON.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::Record => schema_for!(Record),
        SchemaType::Search => schema_for!(SearchResultsResponse),
        SchemaType::List => schema_for!(RecordListResponse),
        SchemaType::Mutation => schema_for!(RecordMutationResponse),
        SchemaType::Delete => schema_for!(RecordDeleteResponse),
        SchemaType::Status => schema_for!(StoreStatusResponse),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
