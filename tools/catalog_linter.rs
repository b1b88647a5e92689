/// Catalog Linter — validates template catalog coverage and quality.
///
/// Usage: catalog_linter <catalog.ron> [--builtin]

use ideation_engine::core::catalog::TemplateCatalog;
use ideation_engine::core::expand::{placeholder_tokens, RECOGNIZED_TOKENS};
use ideation_engine::packs;
use ideation_engine::schema::template::Phase;
use std::collections::HashSet;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog.ron> [--builtin]");
        println!();
        println!("  <catalog.ron>  Path to a RON catalog file");
        println!("  --builtin      Lint the embedded starter catalog instead");
        process::exit(0);
    }

    let catalog = if args[1] == "--builtin" {
        match TemplateCatalog::parse_ron(packs::STARTER) {
            Ok(c) => {
                println!("Loaded embedded starter catalog");
                c
            }
            Err(e) => {
                eprintln!("ERROR: Embedded starter catalog is invalid: {}", e);
                process::exit(1);
            }
        }
    } else {
        match TemplateCatalog::load_from_ron(&args[1]) {
            Ok(c) => {
                println!("Loaded catalog: {}", args[1]);
                c
            }
            Err(e) => {
                eprintln!("ERROR: Failed to load catalog: {}", e);
                process::exit(1);
            }
        }
    };

    let template_count: usize = catalog.categories().iter().map(|c| c.templates.len()).sum();
    println!(
        "{} categories, {} templates",
        catalog.categories().len(),
        template_count
    );

    let (errors, warnings) = lint_catalog(&catalog);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_catalog(catalog: &TemplateCatalog) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let recognized: HashSet<&str> = RECOGNIZED_TOKENS.iter().copied().collect();

    for category in catalog.categories() {
        // Unreachable categories: no keywords means the matcher can never
        // select them (the default category is reached by fallback instead).
        if !category.is_default() && category.keywords.is_empty() {
            warnings.push(format!(
                "Category '{}' has no keywords and can never match a domain",
                category.name
            ));
        }

        // Low variety warning
        if category.templates.len() < 3 {
            warnings.push(format!(
                "Category '{}' has only {} templates (minimum 3 recommended)",
                category.name,
                category.templates.len()
            ));
        }

        // Each phase should have at least one template so late-session
        // batches still find exact phase matches.
        for phase in [Phase::Exploration, Phase::Refinement, Phase::Validation] {
            if !category.templates.iter().any(|t| t.phase == phase) {
                warnings.push(format!(
                    "Category '{}' has no {} templates",
                    category.name,
                    phase.label()
                ));
            }
        }

        // Duplicate texts share one usage key and starve each other.
        let mut seen: HashSet<&str> = HashSet::new();
        for template in &category.templates {
            if !seen.insert(template.key()) {
                warnings.push(format!(
                    "Category '{}' repeats the template '{}'",
                    category.name, template.text
                ));
            }

            // Placeholder tokens must come from the expander's vocabulary.
            for token in placeholder_tokens(&template.text) {
                if !recognized.contains(token.as_str()) {
                    errors.push(format!(
                        "Template '{}' in category '{}' uses unknown placeholder '{{{}}}'",
                        template.text, category.name, token
                    ));
                }
            }
        }
    }

    (errors, warnings)
}
