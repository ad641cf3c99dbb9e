use dotsboxes::selfplay::{run_selfplay, summarize, SelfPlayConfig};
use dotsboxes::{Error, Player, SearchLimits, Winner};

fn config() -> SelfPlayConfig {
    SelfPlayConfig::new(3, 6).with_limits(SearchLimits::depth(3))
}

#[test]
fn every_game_runs_to_the_end() {
    let records = run_selfplay(&config(), None).expect("selfplay");
    assert_eq!(records.len(), 6);
    for (i, r) in records.iter().enumerate() {
        assert_eq!(r.game_id, i as u64, "records come back in game id order");
        assert_eq!(r.moves.len(), 12, "every edge is claimed once");
        assert_eq!(r.human_score + r.agent_score, 4);
        assert_eq!(r.moves[0].player, Player::Human);
        let expected = match r.agent_score.cmp(&r.human_score) {
            std::cmp::Ordering::Greater => Winner::Agent,
            std::cmp::Ordering::Less => Winner::Human,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        assert_eq!(r.winner, expected);
        assert!(r.nodes > 0);
    }
}

#[test]
fn runs_are_reproducible_and_cache_sharing_does_not_change_play() {
    let a = run_selfplay(&config(), None).unwrap();
    let b = run_selfplay(&config(), None).unwrap();
    let c = run_selfplay(&config().with_share_cache(false), None).unwrap();

    for ((ra, rb), rc) in a.iter().zip(&b).zip(&c) {
        assert_eq!(ra.moves, rb.moves);
        assert_eq!(ra.moves, rc.moves, "game {} differs without a shared table", ra.game_id);
        assert_eq!((ra.human_score, ra.agent_score), (rc.human_score, rc.agent_score));
    }

    let other_seed = run_selfplay(&config().with_seed(7), None).unwrap();
    assert!(
        a.iter().zip(&other_seed).any(|(x, y)| x.moves != y.moves),
        "a different seed should change at least one game"
    );
}

#[test]
fn agent_can_open_the_game() {
    let records = run_selfplay(&config().with_starting_player(Player::Agent), None).unwrap();
    assert!(records.iter().all(|r| r.moves[0].player == Player::Agent));
}

#[test]
fn summary_counts_add_up() {
    let records = run_selfplay(&config(), None).unwrap();
    let s = summarize(&records);
    assert_eq!(s.games, 6);
    assert_eq!(s.agent_wins + s.human_wins + s.draws, 6);
    assert_eq!(s.total_nodes, records.iter().map(|r| r.nodes).sum::<u64>());
    assert!((-4.0..=4.0).contains(&s.mean_margin));
    assert_eq!(summarize(&[]).games, 0);
}

#[test]
fn zero_budget_and_bad_size_are_rejected() {
    let zero = SelfPlayConfig::new(3, 1).with_limits(SearchLimits::depth(0));
    assert!(matches!(run_selfplay(&zero, None), Err(Error::InvalidConfig { .. })));
    let bad = SelfPlayConfig::new(12, 1);
    assert!(matches!(run_selfplay(&bad, None), Err(Error::InvalidBoardSize { .. })));
}

#[test]
fn bounded_tables_play_the_same_games() {
    let unbounded = run_selfplay(&config(), None).unwrap();
    for share in [true, false] {
        let bounded_config = config().with_share_cache(share).with_cache_mib(1);
        let bounded = run_selfplay(&bounded_config, None).unwrap();
        for (u, b) in unbounded.iter().zip(&bounded) {
            assert_eq!(u.moves, b.moves, "game {} (shared={share})", u.game_id);
        }
    }
}
