//! Repeated runs must witness identical verdicts

use test_helpers::*;

use std::collections::HashSet;

#[test]
fn test_verdicts_stable_across_runs() {
    let machines = [prefix_scanner(), guessing_machine(), blank_runner()];
    let inputs = ["", "a", "b", "ab", "aa", "aab", "ba", "aaab"];

    for (i, sim) in machines.iter().enumerate() {
        let mut fingerprints = HashSet::new();
        for _ in 0..5 {
            let outputs: String = inputs.iter().map(|s| verdict_char(sim, s)).collect();
            fingerprints.insert(outputs);
        }
        assert_eq!(fingerprints.len(), 1, "machine {i} diverged across runs");
    }
}

#[test]
fn test_stats_stable_across_runs() {
    let sim = guessing_machine();
    let mut spawn_counts = HashSet::new();
    for _ in 0..5 {
        let (_, stats) = sim.run_with_stats(b"aaab");
        spawn_counts.insert(stats.branches_spawned);
    }
    assert_eq!(spawn_counts.len(), 1, "branch accounting diverged");
}
