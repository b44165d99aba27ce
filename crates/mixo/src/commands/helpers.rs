use clap::ArgMatches;
use tracing::{error, info, warn};

use mixo_core::{AppState, MixoConfig, Recipe};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub(crate) fn load_config_with_warning() -> MixoConfig {
    match MixoConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.mixo/config.toml and ./.mixo/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            MixoConfig::default()
        }
    }
}

/// Resolve configuration for a command, applying `--server` on top.
pub(crate) fn load_config(matches: &ArgMatches) -> Result<MixoConfig, Box<dyn std::error::Error>> {
    let mut config = load_config_with_warning();

    if let Some(server) = matches.get_one::<String>("server") {
        config.api.base_url = Some(server.clone());
        if let Err(e) = config.validate() {
            eprintln!("❌ {}", e);
            error!(event = "cli.config.server_invalid", error = %e);
            return Err(e.into());
        }
    }

    Ok(config)
}

/// Build the client state for a command.
pub(crate) fn connect(matches: &ArgMatches) -> Result<AppState, Box<dyn std::error::Error>> {
    let config = load_config(matches)?;
    connect_with(&config)
}

/// Build the client state from an already resolved configuration.
pub(crate) fn connect_with(config: &MixoConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    match AppState::connect(config) {
        Ok(app) => {
            info!(
                event = "cli.connect_completed",
                base_url = %config.client_config().base_url
            );
            Ok(app)
        }
        Err(e) => {
            eprintln!("❌ Failed to set up the HTTP client: {}", e);
            error!(event = "cli.connect_failed", error = %e);
            Err(e.into())
        }
    }
}

/// Whether a `[y/N]` prompt answer means yes.
pub(crate) fn is_confirmation_accepted(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    normalized == "y" || normalized == "yes" || normalized == "o" || normalized == "oui"
}

/// Print one recipe in full.
pub(crate) fn print_recipe(recipe: &Recipe) {
    let heart = if recipe.is_favorite { " ♥" } else { "" };
    println!("🍸 {} (#{}){}", recipe.name, recipe.id, heart);
    println!();
    println!("{}", recipe.description);
    println!();
    println!("Ingredients:");
    for line in recipe.ingredient_lines() {
        println!("  • {}", line);
    }

    if !recipe.musical_ambiance.is_empty() {
        println!();
        println!("Ambiance: {}", recipe.musical_ambiance);
    }

    if let Some(music) = recipe.music_suggestions.as_ref().filter(|m| !m.is_empty()) {
        println!();
        println!("Music:");
        if !music.genres.is_empty() {
            println!("  Genres: {}", music.genres.join(", "));
        }
        for source in &music.sources {
            println!("  {} - {} ({})", source.name, source.description, source.url);
        }
        for recommendation in &music.recommendations {
            println!("  ♪ {}", recommendation);
        }
    }

    if let Some(prompt) = recipe.image_prompt.as_deref().filter(|p| !p.is_empty()) {
        println!();
        println!("Image prompt: {}", prompt);
    }

    if !recipe.user_request.is_empty() {
        println!();
        println!("Requested: \"{}\"", recipe.user_request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_accepted() {
        assert!(is_confirmation_accepted("y\n"));
        assert!(is_confirmation_accepted("YES"));
        assert!(is_confirmation_accepted(" oui "));
        assert!(!is_confirmation_accepted(""));
        assert!(!is_confirmation_accepted("n"));
        assert!(!is_confirmation_accepted("yep"));
    }
}
