use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => commands::search::handle(&args, ctx, flags),
        Commands::List => commands::list::handle(ctx, flags),
        Commands::Create(args) => commands::record::create::run(&args.fields, ctx, flags).await,
        Commands::Update(args) => {
            commands::record::update::run(args.position, &args.fields, ctx, flags).await
        }
        Commands::Delete(args) => {
            commands::record::delete::run(args.position, args.yes, ctx, flags).await
        }
        Commands::Status => commands::status::handle(ctx, flags),
        Commands::Schema(_) | Commands::Guide | Commands::Shell => {
            unreachable!("schema/guide/shell are pre-dispatched in main")
        }
    }
}
