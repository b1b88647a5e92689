/// Domain to category matching.

use crate::schema::category::{Category, DEFAULT_CATEGORY};

/// Matches a free-text domain against category keywords.
///
/// A category matches when any of its keywords occurs case-insensitively
/// inside the domain. Matches keep catalog order. With no match at all the
/// result is the `default` category, so the output is never empty.
pub fn match_domain<'a>(domain: &str, categories: &'a [Category]) -> Vec<&'a str> {
    let needle = domain.to_lowercase();

    let matched: Vec<&str> = categories
        .iter()
        .filter(|c| !c.is_default())
        .filter(|c| {
            c.keywords
                .iter()
                .any(|k| needle.contains(&k.to_lowercase()))
        })
        .map(|c| c.name.as_str())
        .collect();

    if matched.is_empty() {
        vec![DEFAULT_CATEGORY]
    } else {
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn category(name: &str, keywords: &[&str]) -> Category {
        Category {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            templates: Vec::new(),
        }
    }

    fn fixture() -> Vec<Category> {
        vec![
            category("default", &[]),
            category("food", &["restaurant", "cafe", "menu"]),
            category("technology", &["app", "software", "platform"]),
            category("education", &["course", "school"]),
        ]
    }

    #[test]
    fn keyword_substring_matches_case_insensitively() {
        let categories = fixture();
        assert_eq!(match_domain("Restaurant loyalty", &categories), vec!["food"]);
        assert_eq!(match_domain("MY CAFE IDEA", &categories), vec!["food"]);
    }

    #[test]
    fn multiple_matches_keep_catalog_order() {
        let categories = fixture();
        let matched = match_domain("restaurant app", &categories);
        assert_eq!(matched, vec!["food", "technology"]);
    }

    #[test]
    fn no_match_falls_back_to_default() {
        let categories = fixture();
        assert_eq!(match_domain("beekeeping", &categories), vec![DEFAULT_CATEGORY]);
        assert_eq!(match_domain("", &categories), vec![DEFAULT_CATEGORY]);
    }

    #[test]
    fn default_keywords_never_match_directly() {
        let mut categories = fixture();
        categories[0].keywords = FxHashSet::from_iter(["restaurant".to_string()]);
        let matched = match_domain("restaurant", &categories);
        assert_eq!(matched, vec!["food"]);
    }
}
