use dualnback::consts::{GRID_CELLS, LETTER_COUNT, MATCHES_PER_CHANNEL, PLANNED_MATCH_SLOTS};
use dualnback::error::NBackError;
use dualnback::sequence::{self, Sequence};
use dualnback::stimulus::Channel;
use fastrand::Rng;
use rstest::rstest;
use std::collections::BTreeSet;

fn generate(seed: u64, n: usize, n_plus: usize) -> Sequence {
    let mut rng = Rng::with_seed(seed);
    sequence::generate(&mut rng, n, n_plus).expect("generation should succeed")
}

#[rstest]
#[case(1, 20)]
#[case(2, 20)]
#[case(3, 20)]
#[case(5, 12)]
#[case(2, 10)]
#[case(8, 40)]
fn test_exact_match_counts(#[case] n: usize, #[case] n_plus: usize) {
    for seed in 0..25 {
        let seq = generate(seed, n, n_plus);
        assert_eq!(seq.len(), n + n_plus);
        assert_eq!(seq.visual_matches().len(), MATCHES_PER_CHANNEL, "seed {}", seed);
        assert_eq!(seq.auditory_matches().len(), MATCHES_PER_CHANNEL, "seed {}", seed);
        assert_eq!(seq.double_matches().len(), 2, "seed {}", seed);
    }
}

#[test]
fn test_matches_follow_the_plan() {
    let seq = generate(7, 2, 20);
    let plan = seq.plan();

    let visual: BTreeSet<usize> = seq.visual_matches().into_iter().collect();
    let auditory: BTreeSet<usize> = seq.auditory_matches().into_iter().collect();
    assert_eq!(visual, plan.visual());
    assert_eq!(auditory, plan.auditory());

    let all: BTreeSet<usize> = plan
        .visual_only()
        .iter()
        .chain(plan.auditory_only())
        .chain(plan.double())
        .copied()
        .collect();
    assert_eq!(all.len(), PLANNED_MATCH_SLOTS);
    assert!(all.iter().all(|&i| (2..22).contains(&i)));
}

#[test]
fn test_values_stay_in_alphabet() {
    let seq = generate(99, 4, 30);
    assert!(seq.visual().values().iter().all(|&v| v < GRID_CELLS));
    assert!(seq.auditory().values().iter().all(|&v| v < LETTER_COUNT));
}

#[test]
fn test_first_n_steps_never_match() {
    let seq = generate(3, 3, 20);
    for tick in 0..3 {
        assert!(!seq.is_match(Channel::Visual, tick));
        assert!(!seq.is_match(Channel::Auditory, tick));
    }
}

#[test]
fn test_same_seed_same_sequence() {
    assert_eq!(generate(1234, 2, 20), generate(1234, 2, 20));
    assert_ne!(generate(1234, 2, 20), generate(1235, 2, 20));
}

#[test]
fn test_too_few_candidates_is_unsatisfiable() {
    let mut rng = Rng::with_seed(0);
    match sequence::generate(&mut rng, 2, 5) {
        Err(NBackError::Unsatisfiable {
            placed, required, ..
        }) => {
            assert_eq!(placed, 5);
            assert_eq!(required, PLANNED_MATCH_SLOTS);
        }
        other => panic!("expected Unsatisfiable, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_sequence_serializes_both_stacks() {
    let seq = generate(11, 2, 20);
    let json = serde_json::to_value(&seq).unwrap();
    assert_eq!(json["level"], 2);
    assert_eq!(json["visual"].as_array().map(|a| a.len()), Some(22));
    assert_eq!(json["auditory"].as_array().map(|a| a.len()), Some(22));
}
