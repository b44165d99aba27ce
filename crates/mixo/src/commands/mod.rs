use clap::ArgMatches;
use tracing::error;

use mixo_core::events;

pub mod helpers;

mod completions;
mod delete;
mod favorite;
mod generate;
mod list;
mod show;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("generate", sub_matches)) => generate::handle_generate_command(sub_matches).await,
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches).await,
        Some(("show", sub_matches)) => show::handle_show_command(sub_matches).await,
        Some(("favorite", sub_matches)) => favorite::handle_favorite_command(sub_matches).await,
        Some(("delete", sub_matches)) => delete::handle_delete_command(sub_matches).await,
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();
    result
}
