/// Normalizes a category display name into a storage-path-safe identifier:
/// lowercase, spaces to underscores, everything outside `[a-z0-9_]`
/// stripped. Lossy and non-invertible; distinct names can collide.
pub fn normalize_category_id(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Best-effort inverse used for display when only the identifier is at
/// hand: underscores back to spaces, each word capitalized.
pub fn humanize_category_id(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_accented_display_names() {
        assert_eq!(
            normalize_category_id("Conhecimentos Gerais"),
            "conhecimentos_gerais"
        );
    }

    #[test]
    fn strips_everything_outside_the_safe_alphabet() {
        assert_eq!(normalize_category_id("C++!!"), "c");
        assert_eq!(normalize_category_id("História do Brasil"), "histria_do_brasil");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_category_id("Quiz Brasil 2024!");
        assert_eq!(normalize_category_id(&once), once);
    }

    #[test]
    fn distinct_names_can_collide() {
        assert_eq!(
            normalize_category_id("C++"),
            normalize_category_id("C##")
        );
    }

    #[test]
    fn humanize_round_trips_simple_ids() {
        assert_eq!(humanize_category_id("quiz_brasil"), "Quiz Brasil");
        assert_eq!(humanize_category_id("science"), "Science");
    }
}
