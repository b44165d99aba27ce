use clap::ArgMatches;
use tracing::{error, info};

use mixo_core::{FetchOutcome, FilterCriteria, FilterMode, Recipe, ViewStatus};

use super::helpers::connect;
use crate::table::TableFormatter;

pub(crate) async fn handle_list_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let search = matches.get_one::<String>("search").cloned().unwrap_or_default();
    let mode = matches
        .get_one::<String>("filter")
        .map(|s| s.parse::<FilterMode>())
        .transpose()?
        .unwrap_or_default();
    let page = matches.get_one::<u32>("page").copied().unwrap_or(1);

    info!(
        event = "cli.list_started",
        json_output = json_output,
        filter = %mode,
        page = page
    );

    let app = connect(matches)?;

    match app
        .list
        .set_criteria(FilterCriteria::new(search, mode, page))
        .await
    {
        FetchOutcome::Applied { .. } => {}
        FetchOutcome::Failed { error } => {
            eprintln!("❌ {}", error);
            eprintln!("   Run the command again to retry.");

            error!(event = "cli.list_failed", error = %error);
            return Err(error.into());
        }
        FetchOutcome::Superseded | FetchOutcome::Disposed => {
            error!(event = "cli.list_failed", error = "fetch interrupted");
            return Err("List request was interrupted".into());
        }
    }

    let view = app.list.view();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        match app.list.status() {
            ViewStatus::Empty => {
                println!("No cocktails yet. Create one with 'mixo generate \"...\"'.");
            }
            ViewStatus::NoMatches => {
                println!("No cocktails match your search.");
            }
            _ => {
                let rows: Vec<&Recipe> = view.iter().collect();
                println!("Cocktails ({}):", rows.len());
                TableFormatter::new(&rows).print_table(&rows);
                println!("{}", summary_line(rows.len(), &app.list.recipes()));
            }
        }
    }

    info!(event = "cli.list_completed", count = view.len());

    Ok(())
}

/// Footer under the table: shown, loaded and favorite counts.
fn summary_line(shown: usize, loaded: &[Recipe]) -> String {
    let favorites = loaded.iter().filter(|r| r.is_favorite).count();
    format!(
        "{} shown · {} total · {} favorite{}",
        shown,
        loaded.len(),
        favorites,
        if favorites == 1 { "" } else { "s" }
    )
}
