use chrono::{DateTime, Utc};
use mixo_core::Recipe;

pub struct TableFormatter {
    id_width: usize,
    name_width: usize,
    favorite_width: usize,
    created_width: usize,
    request_width: usize,
}

impl TableFormatter {
    pub fn new(recipes: &[&Recipe]) -> Self {
        let id_width = recipes
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(2)
            .max(2);
        let name_width = recipes
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(16)
            .clamp(4, 40); // Between "Name" header min and reasonable terminal width max

        Self {
            id_width,
            name_width,
            favorite_width: 3,
            created_width: 16,
            request_width: 40,
        }
    }

    pub fn print_table(&self, recipes: &[&Recipe]) {
        self.print_header();
        for recipe in recipes {
            self.print_row(recipe);
        }
        self.print_footer();
    }

    fn print_header(&self) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!("{}", self.header_row());
        println!("{}", self.border('├', '┼', '┤'));
    }

    fn print_footer(&self) {
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn print_row(&self, recipe: &Recipe) {
        let favorite = if recipe.is_favorite { "♥" } else { "" };
        let created = recipe
            .created_at_utc()
            .map(format_created)
            .unwrap_or_else(|| recipe.created_at.clone());

        println!(
            "│ {:>width_id$} │ {} │ {} │ {} │ {} │",
            recipe.id,
            truncate(&recipe.name, self.name_width),
            truncate(favorite, self.favorite_width),
            truncate(&created, self.created_width),
            truncate(&recipe.user_request, self.request_width),
            width_id = self.id_width,
        );
    }

    fn header_row(&self) -> String {
        format!(
            "│ {:>width_id$} │ {} │ {} │ {} │ {} │",
            "ID",
            truncate("Name", self.name_width),
            truncate("Fav", self.favorite_width),
            truncate("Created", self.created_width),
            truncate("Request", self.request_width),
            width_id = self.id_width,
        )
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let columns = [
            self.id_width,
            self.name_width,
            self.favorite_width,
            self.created_width,
            self.request_width,
        ];
        let segments: Vec<String> = columns.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&middle.to_string()), right)
    }
}

fn format_created(created: DateTime<Utc>) -> String {
    created.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings
/// including emoji and multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        // Safely truncate at character boundaries, not byte boundaries
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
