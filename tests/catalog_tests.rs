/// Starter catalog integrity tests.

use ideation_engine::core::catalog::TemplateCatalog;
use ideation_engine::core::expand::{placeholder_tokens, RECOGNIZED_TOKENS};
use ideation_engine::core::matcher;
use ideation_engine::packs;
use ideation_engine::schema::template::Phase;

#[test]
fn starter_pack_parses_and_validates() {
    let catalog = TemplateCatalog::parse_ron(packs::STARTER).unwrap();
    assert!(catalog.category("default").is_some());
    assert!(catalog.categories().len() >= 5);
}

#[test]
fn every_category_has_enough_templates() {
    let catalog = packs::starter_catalog();
    for category in catalog.categories() {
        assert!(
            category.templates.len() >= 3,
            "Category '{}' has only {} templates (minimum 3 expected)",
            category.name,
            category.templates.len()
        );
    }
}

#[test]
fn every_placeholder_token_is_recognized() {
    let catalog = packs::starter_catalog();
    for category in catalog.categories() {
        for template in &category.templates {
            for token in placeholder_tokens(&template.text) {
                assert!(
                    RECOGNIZED_TOKENS.contains(&token.as_str()),
                    "Template '{}' in '{}' uses unknown placeholder '{{{}}}'",
                    template.text,
                    category.name,
                    token
                );
            }
        }
    }
}

#[test]
fn every_category_covers_every_phase() {
    let catalog = packs::starter_catalog();
    for category in catalog.categories() {
        for phase in [Phase::Exploration, Phase::Refinement, Phase::Validation] {
            assert!(
                category.templates.iter().any(|t| t.phase == phase),
                "Category '{}' has no {} templates",
                category.name,
                phase.label()
            );
        }
    }
}

#[test]
fn non_default_categories_are_reachable() {
    let catalog = packs::starter_catalog();
    for category in catalog.categories() {
        if !category.is_default() {
            assert!(
                !category.keywords.is_empty(),
                "Category '{}' has no keywords and can never match",
                category.name
            );
        }
    }
}

#[test]
fn common_domains_land_in_sensible_categories() {
    let catalog = packs::starter_catalog();

    let matched = matcher::match_domain("restaurant app", catalog.categories());
    assert!(matched.contains(&"food"));
    assert!(matched.contains(&"technology"));

    let matched = matcher::match_domain("an online course for gardeners", catalog.categories());
    assert!(matched.contains(&"education"));

    let matched = matcher::match_domain("something nobody has keywords for", catalog.categories());
    assert_eq!(matched, vec!["default"]);
}

#[test]
fn weights_stay_in_a_sane_band() {
    let catalog = packs::starter_catalog();
    for category in catalog.categories() {
        for template in &category.templates {
            assert!(
                template.weight >= 0.5 && template.weight <= 5.0,
                "Template '{}' weight {} is outside the expected band",
                template.text,
                template.weight
            );
        }
    }
}
