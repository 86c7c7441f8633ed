use dualnback::config::SessionConfig;
use dualnback::scorer::Rating;
use dualnback::simulation::{simulate_batch, write_csv, BatchSummary, SimulatedPlayer};

#[test]
fn test_perfect_player_always_excellent() {
    let outcomes =
        simulate_batch(&SessionConfig::default(), SimulatedPlayer::perfect(), 50, 100).unwrap();
    assert_eq!(outcomes.len(), 50);
    for o in &outcomes {
        assert!((o.result.d_prime - 1.0).abs() < 1e-9);
        assert_eq!(o.result.vis_wrong + o.result.letter_wrong, 0);
    }

    let summary = BatchSummary::from_outcomes(&outcomes).unwrap();
    assert_eq!(summary.count(Rating::Excellent), 50);
    assert!(summary.std_dev.abs() < 1e-9);
}

#[test]
fn test_silent_player_scores_zero() {
    let player = SimulatedPlayer::new(0.0, 0.0).unwrap();
    let outcomes = simulate_batch(&SessionConfig::default(), player, 20, 7).unwrap();
    assert!(outcomes.iter().all(|o| o.result.d_prime == 0.0));
    assert!(outcomes.iter().all(|o| o.result.vis_misses == 6));
}

#[test]
fn test_batches_are_reproducible_and_ordered() {
    let config = SessionConfig {
        level: 3,
        ..Default::default()
    };
    let player = SimulatedPlayer::new(0.7, 0.2).unwrap();
    let a = simulate_batch(&config, player, 40, 99).unwrap();
    let b = simulate_batch(&config, player, 40, 99).unwrap();

    assert_eq!(a, b);
    for (i, o) in a.iter().enumerate() {
        assert_eq!(o.index, i);
        assert_eq!(o.seed, 99 + i as u64);
    }
}

#[test]
fn test_csv_has_header_and_one_row_per_session() {
    let outcomes =
        simulate_batch(&SessionConfig::default(), SimulatedPlayer::perfect(), 5, 1).unwrap();
    let mut buf = Vec::new();
    write_csv(&outcomes, &mut buf).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("session,seed,vis_hits"));
    assert!(lines[1].ends_with(",excellent"));
}

#[test]
fn test_invalid_config_fails_batch() {
    let config = SessionConfig {
        level: 0,
        ..Default::default()
    };
    assert!(simulate_batch(&config, SimulatedPlayer::perfect(), 3, 0).is_err());
}
