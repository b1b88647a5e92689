/// Restaurant App example — a scripted ideation session.
///
/// Walks one idea from exploration through refinement into validation,
/// always accepting the top-ranked option.
///
/// Run with: cargo run --example restaurant_app

use ideation_engine::core::engine::IdeationEngine;
use ideation_engine::schema::template::Phase;

fn main() {
    let mut engine = IdeationEngine::builder("restaurant app").seed(2026).build();

    println!("========================================");
    println!("   RESTAURANT APP");
    println!("   One idea, nine rounds");
    println!("========================================");
    println!();

    // --- Nine rounds: accept the top option each time ---
    for round in 1..=9 {
        let batch = engine.suggest(5);
        println!(
            "--- Round {} [{} | step {}] ---",
            round,
            batch.phase.label(),
            engine.session().step_count()
        );
        for (i, option) in batch.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option.text);
        }

        let Some(top) = batch.options.first() else {
            println!("  (no options generated)");
            break;
        };
        println!("  -> accepted: {}", top.text);
        println!();
        engine.accept_suggestion(top);
    }

    // --- The journey so far ---
    println!("--- Path from root ---");
    for (i, choice) in engine.session().path().iter().enumerate() {
        println!("  {}. {}", i + 1, choice);
    }
    println!();

    // --- Pin the session back to exploration for one wild round ---
    engine.toggle_phase_override(Phase::Exploration);
    let batch = engine.suggest(4);
    println!("--- Bonus round, pinned to {} ---", batch.phase.label());
    for (i, option) in batch.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option.text);
    }
    println!();

    // --- Release the pin ---
    engine.toggle_phase_override(Phase::Exploration);
    println!("Pin released; back to {}.", engine.phase().label());
}
