use dotsboxes::{apply_move, configure, new_game, render_board, Error, Player, StateDoc};

#[test]
fn parses_json_and_rebuilds_the_state() {
    let json = r#"{"size":3,"edges":"HHA.......A.","next":"agent"}"#;
    let doc = StateDoc::from_json(json).expect("valid json");
    let state = doc.to_state().expect("valid state");

    assert_eq!(state.topology().size(), 3);
    assert_eq!(state.next, Player::Agent);
    assert_eq!(state.edge_owner(0), Some(Player::Human));
    assert_eq!(state.edge_owner(2), Some(Player::Agent));
    assert_eq!(state.edge_owner(10), Some(Player::Agent));
    assert_eq!(state.legal_moves().len(), 8);
    assert_eq!(StateDoc::from_state(&state).boxes, "....");
}

#[test]
fn document_survives_a_trip_through_json() {
    let topo = configure(3).unwrap();
    let mut s = new_game(&topo, Player::Human);
    for e in [0usize, 2, 6] {
        apply_move(&mut s, e, Player::Human).unwrap();
    }
    apply_move(&mut s, 7, Player::Agent).unwrap();

    let doc = StateDoc::from_state(&s);
    assert_eq!(doc.edges, "H.H...HA....");
    assert_eq!(doc.boxes, "A...");
    let back = StateDoc::from_json(&doc.to_json().unwrap()).unwrap().to_state().unwrap();
    assert_eq!(back, s);
}

#[test]
fn lowercase_owners_and_dash_placeholders_are_accepted() {
    let doc = StateDoc::from_json(r#"{"size":2,"edges":"h-a0","next":"human"}"#).unwrap();
    let s = doc.to_state().unwrap();
    assert_eq!(s.edge_owner(0), Some(Player::Human));
    assert_eq!(s.edge_owner(1), None);
    assert_eq!(s.edge_owner(2), Some(Player::Agent));
    assert_eq!(s.edge_owner(3), None);
}

#[test]
fn unknown_owner_character_is_a_notation_error() {
    let doc = StateDoc::from_json(r#"{"size":2,"edges":"HX..","next":"human"}"#).unwrap();
    match doc.to_state() {
        Err(Error::Notation { reason }) => assert!(reason.contains("'X'"), "{reason}"),
        other => panic!("expected Notation error, got {other:?}"),
    }
}

#[test]
fn inconsistent_documents_are_invalid_states() {
    // Wrong edge count.
    let doc = StateDoc::from_json(r#"{"size":3,"edges":"HHA","next":"agent"}"#).unwrap();
    assert!(matches!(doc.to_state(), Err(Error::InvalidState { .. })));

    // Complete box without an owner.
    let doc = StateDoc::from_json(r#"{"size":2,"edges":"HAHA","boxes":".","next":"agent"}"#).unwrap();
    assert!(matches!(doc.to_state(), Err(Error::InvalidState { .. })));

    // Owned box with a missing side.
    let doc = StateDoc::from_json(r#"{"size":2,"edges":"HAH.","boxes":"A","next":"agent"}"#).unwrap();
    assert!(matches!(doc.to_state(), Err(Error::InvalidState { .. })));

    // Board size out of range.
    let doc = StateDoc::from_json(r#"{"size":1,"edges":"","next":"agent"}"#).unwrap();
    assert!(matches!(doc.to_state(), Err(Error::InvalidBoardSize { .. })));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(StateDoc::from_json("{ not json"), Err(Error::Json(_))));
    assert!(matches!(
        StateDoc::from_json(r#"{"size":3,"edges":"","next":"nobody"}"#),
        Err(Error::Json(_))
    ));
}

#[test]
fn renders_owners_on_edges_and_boxes() {
    let doc = StateDoc::from_json(r#"{"size":2,"edges":"HAHA","boxes":"A","next":"human"}"#).unwrap();
    let s = doc.to_state().unwrap();
    assert_eq!(render_board(&s), "+-H-+\nH A A\n+-A-+\n");

    let empty = new_game(&configure(2).unwrap(), Player::Human);
    assert_eq!(render_board(&empty), "+   +\n     \n+   +\n");
}
