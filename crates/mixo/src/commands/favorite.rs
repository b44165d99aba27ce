use clap::ArgMatches;
use tracing::{error, info, warn};

use mixo_core::events;

use super::helpers::connect;

pub(crate) async fn handle_favorite_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = *matches
        .get_one::<i64>("id")
        .ok_or("Id argument is required")?;

    info!(event = "cli.favorite_started", recipe_id = id);

    let app = connect(matches)?;

    if let Err(e) = app.mutations.toggle_favorite(id).await {
        eprintln!("❌ {}", e);

        error!(
            event = "cli.favorite_failed",
            recipe_id = id,
            error = %e
        );

        events::log_app_error(&e);
        return Err(e.into());
    }

    // The server only reports the new flag; read back the recipe for the name.
    match app.gateway().get_recipe(id).await.into_result() {
        Ok(recipe) if recipe.is_favorite => {
            println!("♥ '{}' added to favorites.", recipe.name);
        }
        Ok(recipe) => {
            println!("'{}' removed from favorites.", recipe.name);
        }
        Err(message) => {
            warn!(
                event = "cli.favorite_readback_failed",
                recipe_id = id,
                error = %message
            );
            println!("Favorite toggled for cocktail #{}.", id);
        }
    }

    info!(event = "cli.favorite_completed", recipe_id = id);

    Ok(())
}
