use oxo::{
    Algorithm, COMPUTER, Error, GameStatus, HUMAN, Session, SessionConfig, TieBreak,
    start_session,
    tictactoe::{BoardState, Player, Position},
};

fn session_at(board: &str, to_move: Player, seed: u64) -> Session {
    let board = BoardState::from_string(board).unwrap();
    Session::from_position(board, SessionConfig::new(to_move).with_seed(seed)).unwrap()
}

/// Play a whole game: the human always takes the first legal cell.
fn play_out(session: &mut Session, algorithm: Algorithm) -> Vec<Position> {
    let mut moves = Vec::new();
    while !session.is_over() {
        let position = if session.is_computer_turn() {
            session.apply_computer_move(algorithm).unwrap()
        } else {
            let position = session.legal_moves()[0];
            session.apply_human_move(position).unwrap();
            position
        };
        moves.push(position);
    }
    moves
}

#[test]
fn computer_opening_with_minimax_fills_one_cell() {
    let mut session = start_session(COMPUTER);
    let position = session.apply_computer_move(Algorithm::Minimax).unwrap();

    let corners_and_center = [(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)].map(Position::from);
    assert!(corners_and_center.contains(&position));
    assert_eq!(session.current_board().occupied_count(), 1);
    assert_eq!(
        session
            .current_board()
            .get(position)
            .and_then(|cell| cell.player()),
        Some(COMPUTER)
    );
    assert_eq!(session.current_player(), HUMAN);
    assert_eq!(session.status(), GameStatus::Ongoing);
}

#[test]
fn ranked_strategies_take_the_immediate_win() {
    for algorithm in [Algorithm::Minimax, Algorithm::MostWins, Algorithm::LeastLosses] {
        let mut session = session_at("XX. OO. OX.", COMPUTER, 1);
        let position = session.apply_computer_move(algorithm).unwrap();

        assert_eq!(position, Position::new(0, 2), "{algorithm}");
        assert_eq!(session.status(), GameStatus::Loss, "{algorithm}");
        assert!(session.legal_moves().is_empty());
    }
}

#[test]
fn full_board_without_line_is_a_draw() {
    let session = session_at("XOX XOO OXX", HUMAN, 1);
    assert_eq!(session.status(), GameStatus::Draw);
    assert!(session.is_over());
    assert!(!session.is_computer_turn());
}

#[test]
fn occupied_cell_leaves_session_untouched() {
    let mut session = start_session(HUMAN);
    session.apply_human_move(Position::new(1, 1)).unwrap();
    session.apply_computer_move(Algorithm::Minimax).unwrap();

    let board = *session.current_board();
    let err = session.apply_human_move(Position::new(1, 1)).unwrap_err();

    assert!(matches!(err, Error::OccupiedCell { .. }));
    assert_eq!(session.current_board(), &board);
    assert_eq!(session.current_player(), HUMAN);
    assert_eq!(session.status(), GameStatus::Ongoing);
    assert_eq!(session.current_node().board(), &board);
}

#[test]
fn minimax_never_loses_to_first_cell_human() {
    for first in [COMPUTER, HUMAN] {
        let mut session = start_session(first);
        play_out(&mut session, Algorithm::Minimax);
        assert_ne!(session.status(), GameStatus::Win, "{first} moved first");
    }
}

#[test]
fn human_opening_in_the_corner_loses_to_minimax() {
    let mut session = start_session(HUMAN);
    let moves = play_out(&mut session, Algorithm::Minimax);

    assert_eq!(moves.len(), 6);
    assert_eq!(session.status(), GameStatus::Loss);
}

#[test]
fn same_seed_replays_the_same_random_game() {
    let config = SessionConfig::new(COMPUTER)
        .with_seed(42)
        .with_tie_break(TieBreak::Uniform);

    let mut first = Session::new(config);
    let mut second = Session::new(config);
    assert_eq!(
        play_out(&mut first, Algorithm::Random),
        play_out(&mut second, Algorithm::Random)
    );
    assert_eq!(first.current_board(), second.current_board());
}

#[test]
fn every_algorithm_finishes_a_game() {
    for algorithm in Algorithm::ALL {
        let mut session = Session::new(SessionConfig::new(COMPUTER).with_seed(7));
        let moves = play_out(&mut session, algorithm);

        assert!(session.is_over(), "{algorithm}");
        assert!((5..=9).contains(&moves.len()), "{algorithm}");
        assert_eq!(session.current_node().board(), session.current_board());
    }
}
