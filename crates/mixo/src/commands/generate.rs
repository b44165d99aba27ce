use clap::ArgMatches;
use tracing::{error, info};

use mixo_core::{GenerationMode, events};

use super::helpers::{connect_with, load_config, print_recipe};

pub(crate) async fn handle_generate_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = matches
        .get_one::<String>("request")
        .ok_or("Request argument is required")?;
    let json_output = matches.get_flag("json");

    let mut config = load_config(matches)?;
    if matches.get_flag("simple") {
        config.generation.mode = Some(GenerationMode::Simple);
    }

    info!(
        event = "cli.generate_started",
        mode = %config.generation_mode(),
        chars = request.chars().count()
    );

    let app = connect_with(&config)?;

    if !json_output {
        println!("Shaking up something special...");
    }

    match app.generation.submit(request).await {
        Ok(recipe) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                println!("✅ Cocktail created!");
                println!();
                print_recipe(&recipe);
            }

            info!(event = "cli.generate_completed", recipe_id = recipe.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {}", e);

            error!(
                event = "cli.generate_failed",
                error = %e
            );

            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
