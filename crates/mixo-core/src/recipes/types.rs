use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Server-assigned recipe identifier.
pub type RecipeId = i64;

/// Window inside which a recipe counts as "recent".
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// A generated cocktail recipe.
///
/// `is_favorite` is the only field this client mutates after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    /// Newline-delimited free-text ingredient lines.
    pub ingredients: String,
    #[serde(default)]
    pub musical_ambiance: String,
    #[serde(default)]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_suggestions: Option<MusicSuggestion>,
    #[serde(default)]
    pub user_request: String,
    /// ISO-8601 timestamp as sent by the server.
    pub created_at: String,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Music to go with a recipe. Owned by its `Recipe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSuggestion {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub sources: Vec<MusicSource>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A place to listen to suggested music.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSource {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl MusicSuggestion {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.sources.is_empty() && self.recommendations.is_empty()
    }
}

impl Recipe {
    /// Ingredient lines with surrounding whitespace trimmed and blank lines dropped.
    pub fn ingredient_lines(&self) -> Vec<&str> {
        self.ingredients
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Parse `created_at` as a UTC timestamp.
    ///
    /// Accepts RFC 3339 and offset-less ISO-8601 (assumed UTC). Returns `None`
    /// if the timestamp is unparseable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Whether the recipe was created strictly within the last seven days of `now`.
    ///
    /// Unparseable timestamps are never recent.
    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        let cutoff = now - TimeDelta::days(RECENT_WINDOW_DAYS);
        self.created_at_utc().is_some_and(|created| created > cutoff)
    }
}

/// Which subset of recipes the list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Favorites,
    Recent,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Favorites => "favorites",
            FilterMode::Recent => "recent",
        }
    }

    /// Value for the `filter` query parameter. `All` is sent as no filter.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            FilterMode::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "favorites" | "favourites" => Ok(FilterMode::Favorites),
            "recent" => Ok(FilterMode::Recent),
            _ => Err(ConfigError::InvalidFilterMode {
                filter: s.to_string(),
            }),
        }
    }
}

/// Criteria the list is fetched and filtered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub mode: FilterMode,
    /// Advisory page number, always >= 1. Not enforced client-side.
    pub page: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            mode: FilterMode::All,
            page: 1,
        }
    }
}

impl FilterCriteria {
    pub fn new(search: impl Into<String>, mode: FilterMode, page: u32) -> Self {
        Self {
            search: search.into(),
            mode,
            page: page.max(1),
        }
    }

    /// Search text to send to the server; empty searches are omitted.
    pub fn search_query(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn recipe_created_at(created_at: &str) -> Recipe {
        Recipe {
            id: 1,
            name: "Mojito".to_string(),
            description: "Fresh".to_string(),
            ingredients: "Rum\nMint".to_string(),
            musical_ambiance: String::new(),
            image_prompt: None,
            music_suggestions: None,
            user_request: "something fresh".to_string(),
            created_at: created_at.to_string(),
            is_favorite: false,
        }
    }

    #[test]
    fn test_deserialize_server_payload() {
        let json = r#"{
            "id": 12,
            "name": "Velvet Dusk",
            "description": "A smoky evening drink",
            "ingredients": "5 cl mezcal\n2 cl amaro\n",
            "musical_ambiance": "Slow jazz",
            "image_prompt": null,
            "user_request": "quelque chose de fumé",
            "is_favorite": true,
            "created_at": "2024-05-01T18:30:00.123456+00:00"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, 12);
        assert!(recipe.is_favorite);
        assert!(recipe.image_prompt.is_none());
        assert!(recipe.music_suggestions.is_none());
        assert_eq!(recipe.ingredient_lines(), vec!["5 cl mezcal", "2 cl amaro"]);
    }

    #[test]
    fn test_deserialize_music_suggestions() {
        let json = r#"{
            "id": 3,
            "name": "Lagoon",
            "description": "Tropical",
            "ingredients": "Rum",
            "music_suggestions": {
                "genres": ["Reggae"],
                "sources": [{"name": "Radio", "url": "https://radio.example", "description": "Live"}],
                "recommendations": []
            },
            "created_at": "2024-05-01T18:30:00"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        let music = recipe.music_suggestions.unwrap();
        assert_eq!(music.genres, vec!["Reggae"]);
        assert_eq!(music.sources[0].name, "Radio");
        assert!(music.recommendations.is_empty());
        assert!(!music.is_empty());
        assert_eq!(recipe.musical_ambiance, "");
        assert!(!recipe.is_favorite);
    }

    #[test]
    fn test_ingredient_lines_skips_blank_lines() {
        let mut recipe = recipe_created_at("2024-01-01T00:00:00Z");
        recipe.ingredients = "  4 cl gin \n\n   \n1 lime\r\n".to_string();
        assert_eq!(recipe.ingredient_lines(), vec!["4 cl gin", "1 lime"]);
    }

    #[test]
    fn test_created_at_naive_is_utc() {
        let recipe = recipe_created_at("2024-03-10T08:00:00.5");
        let parsed = recipe.created_at_utc().unwrap();
        assert_eq!(parsed.timestamp(), Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap().timestamp());
    }

    #[test]
    fn test_is_recent_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert!(recipe_created_at("2024-06-14T12:00:00Z").is_recent(now));
        assert!(recipe_created_at("2024-06-08T12:00:01Z").is_recent(now));
        // Exactly seven days old is outside the window
        assert!(!recipe_created_at("2024-06-08T12:00:00Z").is_recent(now));
        assert!(!recipe_created_at("2024-01-01T00:00:00Z").is_recent(now));
        assert!(!recipe_created_at("not a date").is_recent(now));
    }

    #[test]
    fn test_filter_mode_parsing() {
        assert_eq!("favorites".parse::<FilterMode>().unwrap(), FilterMode::Favorites);
        assert_eq!("RECENT".parse::<FilterMode>().unwrap(), FilterMode::Recent);
        let error = "popular".parse::<FilterMode>().unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidFilterMode { ref filter } if filter == "popular"
        ));
        assert_eq!(
            error.to_string(),
            "Invalid filter 'popular'. Valid: all, favorites, recent"
        );
        assert_eq!(FilterMode::All.as_query(), None);
        assert_eq!(FilterMode::Favorites.as_query(), Some("favorites"));
    }

    #[test]
    fn test_filter_criteria_page_is_positive() {
        let criteria = FilterCriteria::new("gin", FilterMode::All, 0);
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.search_query(), Some("gin"));
        assert_eq!(FilterCriteria::default().search_query(), None);
    }
}
