//! Derived view over the authoritative recipe list.
//!
//! Pure functions: no I/O, no clock reads. Callers pass `now` so the
//! "recent" window is evaluated at a single instant per view.

use chrono::{DateTime, Utc};

use crate::recipes::types::{FilterCriteria, FilterMode, Recipe};

/// Case-insensitive substring match against name, description or ingredients.
///
/// Only an empty search matches everything. Whitespace is matched literally.
pub fn matches_search(recipe: &Recipe, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();

    [&recipe.name, &recipe.description, &recipe.ingredients]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn matches_mode(recipe: &Recipe, mode: FilterMode, now: DateTime<Utc>) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Favorites => recipe.is_favorite,
        FilterMode::Recent => recipe.is_recent(now),
    }
}

/// Recipes passing both the search and the mode predicate, in original order.
pub fn derive_view<'a>(
    recipes: &'a [Recipe],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| matches_search(recipe, &criteria.search))
        .filter(|recipe| matches_mode(recipe, criteria.mode, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn make_recipe(id: i64, name: &str, is_favorite: bool, age_days: i64) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            ingredients: "Ice\nSugar".to_string(),
            musical_ambiance: String::new(),
            image_prompt: None,
            music_suggestions: None,
            user_request: String::new(),
            created_at: (now() - TimeDelta::days(age_days)).to_rfc3339(),
            is_favorite,
        }
    }

    fn ids(view: &[&Recipe]) -> Vec<i64> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_favorites_filter_keeps_only_favorites() {
        let recipes = vec![
            make_recipe(1, "Negroni", false, 1),
            make_recipe(2, "Paloma", false, 2),
            make_recipe(3, "Sazerac", true, 30),
            make_recipe(4, "Gimlet", false, 40),
        ];
        let criteria = FilterCriteria::new("", FilterMode::Favorites, 1);

        assert_eq!(ids(&derive_view(&recipes, &criteria, now())), vec![3]);
    }

    #[test]
    fn test_recent_filter_uses_seven_day_window() {
        let recipes = vec![
            make_recipe(1, "Negroni", false, 1),
            make_recipe(2, "Paloma", true, 8),
            make_recipe(3, "Sazerac", false, 6),
        ];
        let criteria = FilterCriteria::new("", FilterMode::Recent, 1);

        assert_eq!(ids(&derive_view(&recipes, &criteria, now())), vec![1, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut by_ingredient = make_recipe(3, "Bramble", false, 1);
        by_ingredient.ingredients = "Gin\nBLACKBERRY liqueur".to_string();
        let recipes = vec![
            make_recipe(1, "Blackberry Smash", false, 1),
            make_recipe(2, "Paloma", false, 1),
            by_ingredient,
        ];
        let criteria = FilterCriteria::new("blackBerry", FilterMode::All, 1);

        assert_eq!(ids(&derive_view(&recipes, &criteria, now())), vec![1, 3]);
    }

    #[test]
    fn test_search_and_mode_must_both_pass() {
        let recipes = vec![
            make_recipe(1, "Gin Fizz", true, 1),
            make_recipe(2, "Gin Basil Smash", false, 1),
            make_recipe(3, "Rum Punch", true, 1),
        ];
        let criteria = FilterCriteria::new("gin", FilterMode::Favorites, 1);

        assert_eq!(ids(&derive_view(&recipes, &criteria, now())), vec![1]);
    }

    #[test]
    fn test_search_whitespace_is_matched_literally() {
        let recipes = vec![make_recipe(1, "Gin", false, 1)];

        let leading_space = FilterCriteria::new(" gin", FilterMode::All, 1);
        assert!(derive_view(&recipes, &leading_space, now()).is_empty());

        let blank = FilterCriteria::new("   ", FilterMode::All, 1);
        assert!(derive_view(&recipes, &blank, now()).is_empty());

        let inner_space = FilterCriteria::new("n desc", FilterMode::All, 1);
        assert_eq!(ids(&derive_view(&recipes, &inner_space, now())), vec![1]);
    }

    #[test]
    fn test_empty_list_yields_empty_view() {
        let criteria = FilterCriteria::default();
        assert!(derive_view(&[], &criteria, now()).is_empty());
    }

    fn arb_recipe() -> impl Strategy<Value = Recipe> {
        (
            any::<i64>(),
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z\n ]{0,12}",
            any::<bool>(),
            0i64..20,
        )
            .prop_map(|(id, name, description, ingredients, is_favorite, age)| {
                let mut recipe = make_recipe(id, &name, is_favorite, age);
                recipe.description = description;
                recipe.ingredients = ingredients;
                recipe
            })
    }

    fn arb_mode() -> impl Strategy<Value = FilterMode> {
        prop_oneof![
            Just(FilterMode::All),
            Just(FilterMode::Favorites),
            Just(FilterMode::Recent),
        ]
    }

    proptest! {
        #[test]
        fn prop_view_matches_reference_predicate(
            recipes in proptest::collection::vec(arb_recipe(), 0..16),
            search in "[a-zA-Z \t]{0,4}",
            mode in arb_mode(),
        ) {
            let criteria = FilterCriteria::new(search.clone(), mode, 1);
            let view = derive_view(&recipes, &criteria, now());

            let needle = search.to_lowercase();
            let expected: Vec<&Recipe> = recipes
                .iter()
                .filter(|r| {
                    needle.is_empty()
                        || r.name.to_lowercase().contains(&needle)
                        || r.description.to_lowercase().contains(&needle)
                        || r.ingredients.to_lowercase().contains(&needle)
                })
                .filter(|r| match mode {
                    FilterMode::All => true,
                    FilterMode::Favorites => r.is_favorite,
                    FilterMode::Recent => {
                        r.created_at_utc().unwrap() > now() - TimeDelta::days(7)
                    }
                })
                .collect();

            prop_assert_eq!(view, expected);
        }
    }
}
