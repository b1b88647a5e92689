/// Preview — interactive session shell for testing catalogs.
///
/// Usage: preview --domain <text> [--catalog <path>] [--seed <n>]
///
/// Commands:
///   suggest [n]     — generate n ranked options (default 5)
///   accept <i>      — accept option i from the last batch
///   custom <text>   — accept free text as the next choice
///   goto <id>       — move the current pointer to a tree node
///   tree            — print the history tree with node ids
///   path            — print the path from root to current
///   phase [name]    — toggle the phase pin, or show the current phase
///   save <file>     — write the session snapshot as RON
///   load <file>     — restore a session snapshot
///   seed <n>        — set RNG seed (session carries over)
///   reset           — clear the session
///   help            — list commands
///   quit            — exit

use ideation_engine::core::catalog::TemplateCatalog;
use ideation_engine::core::engine::IdeationEngine;
use ideation_engine::core::history::HistoryTree;
use ideation_engine::schema::snapshot::SessionSnapshot;
use ideation_engine::schema::suggestion::SuggestionBatch;
use ideation_engine::schema::template::Phase;
use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut domain = None;
    let mut catalog_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--domain" if i + 1 < args.len() => {
                i += 1;
                domain = Some(args[i].clone());
            }
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(domain) = domain else {
        eprintln!("Missing required --domain argument");
        print_usage();
        std::process::exit(1);
    };

    let catalog = match catalog_path {
        Some(ref path) => match TemplateCatalog::load_from_ron(path) {
            Ok(c) => {
                println!("Loaded catalog: {}", path);
                c
            }
            Err(e) => {
                eprintln!("ERROR loading catalog {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!("Using embedded starter catalog");
            ideation_engine::packs::starter_catalog()
        }
    };

    let mut current_seed = seed;
    let mut engine = build_engine(&domain, catalog.clone(), current_seed);
    let mut last_batch: Option<SuggestionBatch> = None;

    println!("Domain: {}", domain);
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("ideate> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "suggest" | "s" => {
                let count: usize = parts
                    .get(1)
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5);
                let batch = engine.suggest(count);
                println!("\n[{} | step {}]", batch.phase.label(), engine.session().step_count());
                if batch.options.is_empty() {
                    println!("(no options generated)");
                }
                for (i, option) in batch.options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option.text);
                }
                println!();
                last_batch = Some(batch);
            }
            "accept" | "a" => {
                let Some(ref batch) = last_batch else {
                    println!("No batch yet. Run 'suggest' first.");
                    continue;
                };
                let index = parts.get(1).and_then(|p| p.parse::<usize>().ok());
                let Some(index) = index.filter(|&i| i >= 1 && i <= batch.options.len()) else {
                    println!("Usage: accept <1..{}>", batch.options.len());
                    continue;
                };
                let chosen = batch.options[index - 1].clone();
                let id = engine.accept_suggestion(&chosen);
                println!("Accepted [{}]: {}", id, chosen.text);
                last_batch = None;
            }
            "custom" => {
                if parts.len() < 2 {
                    println!("Usage: custom <text>");
                    continue;
                }
                let text = parts[1..].join(" ");
                let id = engine.accept_custom(&text);
                println!("Accepted [{}]: {}", id, text);
                last_batch = None;
            }
            "goto" => {
                let Some(id) = parts.get(1) else {
                    println!("Usage: goto <node id>");
                    continue;
                };
                if engine.navigate_to(id) {
                    println!("Moved to [{}]. Step count is now {}.", id, engine.session().step_count());
                } else {
                    println!("No node with id '{}'", id);
                }
            }
            "tree" => {
                let tree = engine.session().tree();
                match tree.root_id() {
                    Some(root) => print_tree(tree, root, 0),
                    None => println!("(empty tree)"),
                }
            }
            "path" => {
                let path = engine.session().path();
                if path.is_empty() {
                    println!("(empty path)");
                }
                for (i, choice) in path.iter().enumerate() {
                    println!("  {}. {}", i + 1, choice);
                }
            }
            "phase" => {
                let Some(name) = parts.get(1) else {
                    match engine.session().phase_override() {
                        Some(p) => println!("{} (pinned)", p.label()),
                        None => println!("{} (automatic)", engine.phase().label()),
                    }
                    continue;
                };
                let Some(requested) = parse_phase(name) else {
                    println!("Unknown phase: {}", name);
                    println!("Phases: exploration, refinement, validation");
                    continue;
                };
                engine.toggle_phase_override(requested);
                match engine.session().phase_override() {
                    Some(p) => println!("Pinned to {}.", p.label()),
                    None => println!("Back to automatic ({}).", engine.phase().label()),
                }
            }
            "save" => {
                let Some(file) = parts.get(1) else {
                    println!("Usage: save <file>");
                    continue;
                };
                let snapshot = engine.snapshot();
                match ron::ser::to_string_pretty(&snapshot, ron::ser::PrettyConfig::default()) {
                    Ok(serialized) => match std::fs::write(file, serialized) {
                        Ok(()) => println!("Saved session to {}", file),
                        Err(e) => println!("ERROR writing {}: {}", file, e),
                    },
                    Err(e) => println!("ERROR serializing session: {}", e),
                }
            }
            "load" => {
                let Some(file) = parts.get(1) else {
                    println!("Usage: load <file>");
                    continue;
                };
                let contents = match std::fs::read_to_string(file) {
                    Ok(c) => c,
                    Err(e) => {
                        println!("ERROR reading {}: {}", file, e);
                        continue;
                    }
                };
                let snapshot: SessionSnapshot = match ron::from_str(&contents) {
                    Ok(s) => s,
                    Err(e) => {
                        println!("ERROR parsing {}: {}", file, e);
                        continue;
                    }
                };
                match engine.restore(snapshot) {
                    Ok(()) => {
                        println!(
                            "Restored session ({} steps, {})",
                            engine.session().step_count(),
                            engine.phase().label()
                        );
                        last_batch = None;
                    }
                    Err(e) => println!("ERROR restoring session: {}", e),
                }
            }
            "seed" => {
                let Some(value) = parts.get(1) else {
                    println!("Current seed: {}", current_seed);
                    continue;
                };
                match value.parse::<u64>() {
                    Ok(s) => {
                        current_seed = s;
                        let snapshot = engine.snapshot();
                        engine = build_engine(&domain, catalog.clone(), current_seed);
                        if let Err(e) = engine.restore(snapshot) {
                            println!("ERROR carrying session over: {}", e);
                        }
                        println!("Seed set to {}", current_seed);
                    }
                    Err(_) => {
                        println!("Invalid seed: {}", value);
                    }
                }
            }
            "reset" => {
                engine.reset();
                last_batch = None;
                println!("Session cleared.");
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Preview — interactive session shell for testing catalogs.");
    println!();
    println!("Usage: preview --domain <text> [--catalog <path>] [--seed <n>]");
    println!();
    println!("  --domain <text>   Domain the session explores (required)");
    println!("  --catalog <path>  Path to a RON catalog file (default: embedded starter)");
    println!("  --seed <n>        Initial RNG seed (default: 42)");
}

fn print_help() {
    println!("Commands:");
    println!("  suggest [n]     Generate n ranked options (default 5)");
    println!("  accept <i>      Accept option i from the last batch");
    println!("  custom <text>   Accept free text as the next choice");
    println!("  goto <id>       Move the current pointer to a tree node");
    println!("  tree            Print the history tree with node ids");
    println!("  path            Print the path from root to current");
    println!("  phase [name]    Toggle the phase pin, or show the current phase");
    println!("  save <file>     Write the session snapshot as RON");
    println!("  load <file>     Restore a session snapshot");
    println!("  seed <n>        Set RNG seed (session carries over)");
    println!("  reset           Clear the session");
    println!("  help            Show this help");
    println!("  quit            Exit");
    println!();
    println!("Phases: exploration, refinement, validation");
}

fn parse_phase(s: &str) -> Option<Phase> {
    match s.to_lowercase().as_str() {
        "exploration" => Some(Phase::Exploration),
        "refinement" => Some(Phase::Refinement),
        "validation" => Some(Phase::Validation),
        _ => None,
    }
}

fn print_tree(tree: &HistoryTree, id: &str, depth: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let marker = if tree.current_id() == Some(id) { "*" } else { " " };
    println!(
        "{}{} [{}] {}",
        "  ".repeat(depth),
        marker,
        node.id,
        node.choice_text
    );
    for child in &node.children {
        print_tree(tree, child, depth + 1);
    }
}

fn build_engine(domain: &str, catalog: TemplateCatalog, seed: u64) -> IdeationEngine {
    IdeationEngine::builder(domain)
        .with_catalog(catalog)
        .seed(seed)
        .build()
}
