/// Study Planner example — branching history and snapshots.
///
/// Explores two directions from the same starting point, then saves the
/// whole session to RON and restores it into a fresh engine.
///
/// Run with: cargo run --example study_planner

use ideation_engine::core::engine::IdeationEngine;
use ideation_engine::schema::snapshot::SessionSnapshot;

fn main() {
    let mut engine = IdeationEngine::builder("study planner for exam prep")
        .seed(7)
        .build();

    println!("========================================");
    println!("   STUDY PLANNER");
    println!("   Two branches, one snapshot");
    println!("========================================");
    println!();

    // --- Take the first suggestion as the trunk ---
    let batch = engine.suggest(5);
    let trunk = batch.options[0].clone();
    let fork_id = engine.accept_suggestion(&trunk);
    println!("Trunk: {}", trunk.text);

    // --- Branch A: keep following generated options ---
    let batch = engine.suggest(5);
    let next = batch.options[0].clone();
    engine.accept_suggestion(&next);
    println!("Branch A: {}", next.text);

    // --- Back to the fork, then branch B with a custom idea ---
    engine.navigate_to(&fork_id);
    engine.accept_custom("pair up with a classmate for weekly reviews");
    println!("Branch B: pair up with a classmate for weekly reviews");
    println!();

    println!("Current path: {:?}", engine.session().path());
    println!();

    // --- Save the session ---
    let snapshot = engine.snapshot();
    let saved = ron::ser::to_string_pretty(&snapshot, ron::ser::PrettyConfig::default())
        .expect("Failed to serialize session");
    println!("--- Saved session ({} bytes of RON) ---", saved.len());
    println!("{}", saved);

    // --- Restore into a fresh engine and keep going ---
    let restored: SessionSnapshot = ron::from_str(&saved).expect("Failed to parse session");
    let mut engine2 = IdeationEngine::builder("study planner for exam prep")
        .seed(7)
        .build();
    engine2
        .restore(restored)
        .expect("Failed to restore session");

    println!("--- Restored path: {:?}", engine2.session().path());
    let batch = engine2.suggest(4);
    println!("--- Next options after restore [{}] ---", batch.phase.label());
    for (i, option) in batch.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option.text);
    }
}
