use std::io::{self, Write};

use clap::ArgMatches;
use tracing::{error, info};

use mixo_core::{MutationOutcome, events};

use super::helpers::{connect, is_confirmation_accepted};

pub(crate) async fn handle_delete_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = *matches
        .get_one::<i64>("id")
        .ok_or("Id argument is required")?;
    let force = matches.get_flag("force");

    info!(event = "cli.delete_started", recipe_id = id, force = force);

    let app = connect(matches)?;
    app.mutations.request_delete(id);

    // Confirmation prompt unless --force is specified
    let confirmed = if force {
        true
    } else {
        print!("Delete cocktail #{}? This cannot be undone. [y/N] ", id);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        is_confirmation_accepted(&input)
    };

    match app.mutations.resolve_delete(confirmed).await {
        Ok(MutationOutcome::Cancelled) => {
            println!("Aborted.");
            info!(event = "cli.delete_aborted", recipe_id = id);
            Ok(())
        }
        Ok(_) => {
            println!("✅ Cocktail #{} deleted.", id);
            info!(event = "cli.delete_completed", recipe_id = id);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {}", e);

            error!(
                event = "cli.delete_failed",
                recipe_id = id,
                error = %e
            );

            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
