use clap::ArgMatches;
use tracing::{error, info};

use super::helpers::{connect, print_recipe};

pub(crate) async fn handle_show_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = *matches
        .get_one::<i64>("id")
        .ok_or("Id argument is required")?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.show_started", recipe_id = id);

    let app = connect(matches)?;

    match app.gateway().get_recipe(id).await.into_result() {
        Ok(recipe) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                print_recipe(&recipe);
            }

            info!(event = "cli.show_completed", recipe_id = id);
            Ok(())
        }
        Err(message) => {
            eprintln!("❌ {}", message);

            error!(
                event = "cli.show_failed",
                recipe_id = id,
                error = %message
            );

            Err(message.into())
        }
    }
}
