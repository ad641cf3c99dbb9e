use std::sync::Arc;

use dotsboxes::solver::{
    full_width_nodes, table_for_board, InMemoryTT, TranspositionTable, NODE_ESTIMATE_LIMIT,
};
use dotsboxes::{
    apply_move, box_margin, configure, new_game, player_move, search, BoardState, Player,
    SearchLimits, Solver, Topology, MAX_BOARD_SIZE,
};

fn board(n: usize) -> Arc<Topology> {
    configure(n).expect("valid size")
}

fn state_with(topo: &Arc<Topology>, claimed: &[usize], next: Player) -> BoardState {
    let mut s = new_game(topo, Player::Human);
    for &e in claimed {
        apply_move(&mut s, e, Player::Human).expect("legal edge");
    }
    s.next = next;
    s
}

/// Every edge claimed, boxes 0, 1 and 3 to the agent, box 2 to the human.
fn finished_3x3() -> BoardState {
    let topo = board(3);
    let edges = vec![Some(Player::Human); 12];
    let boxes = [
        Some(Player::Agent),
        Some(Player::Agent),
        Some(Player::Human),
        Some(Player::Agent),
    ];
    BoardState::from_owners(&topo, &edges, &boxes, Player::Agent).expect("consistent state")
}

#[test]
fn terminal_position_scores_exactly() {
    let s = finished_3x3();
    for mover in [Player::Agent, Player::Human] {
        for depth in [None, Some(0), Some(5)] {
            let mut tt = InMemoryTT::new();
            let r = search(&s, mover, depth, &mut tt);
            assert_eq!(r.value, 2, "agent 3 boxes vs human 1");
            assert_eq!(r.best_move, None);
            assert_eq!(r.nodes, 1);
            assert!(tt.is_empty(), "terminal leaves are not cached");
        }
    }
}

#[test]
fn zero_budget_returns_current_margin_without_a_move() {
    let topo = board(3);
    let mut s = state_with(&topo, &[0, 2, 6], Player::Human);
    apply_move(&mut s, 7, Player::Agent).unwrap();
    let mut tt = InMemoryTT::new();
    let r = search(&s, Player::Agent, Some(0), &mut tt);
    assert_eq!(r.value, 1);
    assert_eq!(r.best_move, None);
    assert_eq!(r.value, box_margin(&s));
}

#[test]
fn one_ply_takes_the_free_box() {
    let topo = board(3);
    // Box 0 needs only edge 7.
    let s = state_with(&topo, &[0, 2, 6], Player::Agent);
    let mut tt = InMemoryTT::new();
    let r = search(&s, Player::Agent, Some(1), &mut tt);
    assert_eq!(r.best_move, Some(7));
    assert_eq!(r.value, 1);

    let mut tt = InMemoryTT::new();
    let r = search(&s, Player::Human, Some(1), &mut tt);
    assert_eq!(r.best_move, Some(7));
    assert_eq!(r.value, -1);
}

#[test]
fn ties_resolve_to_lowest_edge() {
    // Nothing can be closed within two plies of an empty board.
    let topo = board(3);
    let s = new_game(&topo, Player::Agent);
    let mut tt = InMemoryTT::new();
    let r = search(&s, Player::Agent, Some(2), &mut tt);
    assert_eq!(r.value, 0);
    assert_eq!(r.best_move, Some(0));
}

#[test]
fn closing_a_box_hands_the_next_ply_to_the_same_player() {
    let topo = board(3);
    // Box 0 needs edge 7; after it, box 1 needs only edge 8.
    let s = state_with(&topo, &[0, 2, 6, 1, 3], Player::Agent);

    let mut tt = InMemoryTT::new();
    let r = search(&s, Player::Agent, Some(2), &mut tt);
    assert_eq!(r.best_move, Some(7), "7 then 8 takes both boxes");
    assert_eq!(r.value, 2);

    let mut tt = InMemoryTT::new();
    let r = search(&s, Player::Human, Some(2), &mut tt);
    assert_eq!(r.best_move, Some(7));
    assert_eq!(r.value, -2);
}

#[test]
fn full_search_on_empty_3x3_is_symmetric() {
    let topo = board(3);
    let mut tt = InMemoryTT::new();
    let agent_first = search(&new_game(&topo, Player::Agent), Player::Agent, None, &mut tt);
    let human_first = search(&new_game(&topo, Player::Human), Player::Human, None, &mut tt);

    assert!((-4..=4).contains(&agent_first.value));
    assert_eq!(agent_first.value % 2, 0, "four boxes: the margin is even");
    assert_eq!(human_first.value, -agent_first.value, "roles swap, value negates");

    let edge = agent_first.best_move.expect("a move on a non-terminal board");
    let mut s = new_game(&topo, Player::Agent);
    let out = player_move(&mut s, usize::from(edge), Player::Agent).expect("engine move is legal");
    assert!(out.completed.is_empty());
}

#[test]
fn search_is_deterministic_across_fresh_tables() {
    let topo = board(3);
    let s = state_with(&topo, &[1, 4, 9], Player::Agent);
    let a = search(&s, Player::Agent, None, &mut InMemoryTT::new());
    let b = search(&s, Player::Agent, None, &mut InMemoryTT::new());
    assert_eq!(a, b);
}

#[test]
fn warm_cache_answers_the_root_and_clear_reproduces_the_result() {
    let topo = board(3);
    let s = state_with(&topo, &[0, 5, 11], Player::Human);
    let mut tt = InMemoryTT::new();

    let cold = search(&s, Player::Human, None, &mut tt);
    assert!(!tt.is_empty());

    let warm = search(&s, Player::Human, None, &mut tt);
    assert_eq!((warm.value, warm.best_move), (cold.value, cold.best_move));
    assert_eq!(warm.nodes, 1);
    assert_eq!(warm.cache_hits, 1);

    tt.clear();
    assert!(tt.is_empty());
    let again = search(&s, Player::Human, None, &mut tt);
    assert_eq!(again, cold);
}

#[test]
fn search_leaves_the_input_state_untouched() {
    let topo = board(3);
    let s = state_with(&topo, &[2, 3], Player::Agent);
    let before = s.clone();
    let _ = search(&s, Player::Agent, Some(4), &mut InMemoryTT::new());
    assert_eq!(s, before);
}

#[test]
fn solver_bundles_limits_and_table() {
    let topo = board(4);
    let s = new_game(&topo, Player::Agent);
    let mut solver = Solver::new(SearchLimits::depth(3));
    assert_eq!(solver.limits(), SearchLimits::depth(3));

    let r = solver.search(&s, Player::Agent);
    assert!(r.best_move.is_some());
    assert!(!solver.table().is_empty());

    solver.set_limits(SearchLimits::depth(0));
    let r = solver.search(&s, Player::Agent);
    assert_eq!((r.value, r.best_move), (0, None));

    solver.clear();
    assert!(solver.table().is_empty());
}

#[test]
fn size_policy_searches_small_boards_to_the_end() {
    assert_eq!(SearchLimits::for_board(2), SearchLimits::unbounded());
    assert_eq!(SearchLimits::for_board(3), SearchLimits::unbounded());
    assert_eq!(SearchLimits::default(), SearchLimits::unbounded());
}

#[test]
fn size_policy_shrinks_the_budget_as_edges_grow() {
    let budgets: Vec<Option<u8>> = (4..=8).map(|n| SearchLimits::for_board(n).depth).collect();
    assert_eq!(budgets, vec![Some(5), Some(5), Some(4), Some(4), Some(3)]);
    for n in 4..=MAX_BOARD_SIZE {
        let edges = (2 * n * (n - 1)) as u64;
        let plies = SearchLimits::for_board(n).depth.expect("bounded above 3x3");
        let nodes = full_width_nodes(edges, plies).expect("no overflow");
        assert!(nodes <= NODE_ESTIMATE_LIMIT, "n={n}: {nodes} nodes at {plies} plies");
    }
}

#[test]
fn full_width_nodes_counts_every_level() {
    assert_eq!(full_width_nodes(12, 0), Some(1));
    assert_eq!(full_width_nodes(12, 2), Some(1 + 12 + 12 * 11));
    assert_eq!(full_width_nodes(2, 4), Some(1 + 2 + 2));
    assert_eq!(full_width_nodes(u64::MAX, 3), None);
}

#[test]
fn default_search_on_the_largest_board_stays_bounded() {
    let topo = board(MAX_BOARD_SIZE);
    let s = new_game(&topo, Player::Agent);
    let limits = SearchLimits::for_board(MAX_BOARD_SIZE);
    let plies = limits.depth.expect("bounded");
    let edges = topo.total_edges() as u64;
    let mut tt = table_for_board(MAX_BOARD_SIZE, None);

    let r = search(&s, Player::Agent, limits.depth, tt.as_mut());
    assert_eq!(r.best_move, Some(0), "nothing closes within the budget");
    assert_eq!(r.value, 0);
    assert!(r.nodes <= full_width_nodes(edges, plies).unwrap());
    // Leaves at the cutoff are never stored.
    let interior = full_width_nodes(edges, plies - 1).unwrap();
    assert!(!tt.is_empty());
    assert!(tt.len() as u64 <= interior, "{} entries", tt.len());
}
