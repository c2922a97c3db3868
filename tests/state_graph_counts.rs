use std::collections::HashSet;

use oxo::{
    StateGraph, Tally,
    tictactoe::{BoardState, Player},
};

struct GameEnumerationStats {
    total_games: u64,
    one_wins: u64,
    two_wins: u64,
    draws: u64,
    distinct_states: HashSet<(BoardState, Player)>,
}

/// Walk every move sequence without any memoization.
fn enumerate_all_games(first: Player) -> GameEnumerationStats {
    fn traverse(state: BoardState, turn: Player, stats: &mut GameEnumerationStats) {
        stats.distinct_states.insert((state, turn));
        if state.is_terminal() {
            stats.total_games += 1;
            match state.winner() {
                Some(Player::One) => stats.one_wins += 1,
                Some(Player::Two) => stats.two_wins += 1,
                None => stats.draws += 1,
            }
            return;
        }

        for position in state.empty_cells() {
            traverse(state.apply(position, turn), turn.opponent(), stats);
        }
    }

    let mut stats = GameEnumerationStats {
        total_games: 0,
        one_wins: 0,
        two_wins: 0,
        draws: 0,
        distinct_states: HashSet::new(),
    };
    traverse(BoardState::new(), first, &mut stats);
    stats
}

#[test]
fn full_graph_from_empty_board_has_known_shape() {
    let graph = StateGraph::build(BoardState::new(), Player::One);

    assert_eq!(graph.len(), 5_478);
    assert_eq!(graph.terminal_count(), 958);
    assert_eq!(graph.edge_count(), 16_167);
    assert_eq!(graph.root().score(), 0);
    assert_eq!(graph.root().tally(), Tally::new(131_184, 77_904, 46_080));
    assert_eq!(graph.root().tally().total(), 255_168);
}

#[test]
fn human_first_mirrors_the_tallies() {
    let graph = StateGraph::build(BoardState::new(), Player::Two);

    assert_eq!(graph.len(), 5_478);
    assert_eq!(graph.terminal_count(), 958);
    assert_eq!(graph.root().score(), 0);
    assert_eq!(graph.root().tally(), Tally::new(77_904, 131_184, 46_080));
}

#[test]
fn root_tally_matches_brute_force_enumeration() {
    for first in [Player::One, Player::Two] {
        let stats = enumerate_all_games(first);
        let graph = StateGraph::build(BoardState::new(), first);
        let tally = graph.root().tally();

        assert_eq!(tally.win, stats.one_wins, "{first}");
        assert_eq!(tally.loss, stats.two_wins, "{first}");
        assert_eq!(tally.draw, stats.draws, "{first}");
        assert_eq!(tally.total(), stats.total_games, "{first}");
        assert_eq!(graph.len(), stats.distinct_states.len(), "{first}");
    }
}

#[test]
fn opening_moves_have_expected_tallies() {
    let graph = StateGraph::build(BoardState::new(), Player::One);
    let tallies: Vec<Tally> = graph
        .children(graph.root_id())
        .map(|child| child.tally())
        .collect();

    let corner = Tally::new(14_652, 7_896, 5_184);
    let edge = Tally::new(14_232, 10_176, 5_184);
    let center = Tally::new(15_648, 5_616, 4_608);
    assert_eq!(
        tallies,
        vec![corner, edge, corner, edge, center, edge, corner, edge, corner]
    );
    assert!(
        graph
            .children(graph.root_id())
            .all(|child| child.score() == 0)
    );
}

#[test]
fn every_node_is_consistent() {
    let graph = StateGraph::build(BoardState::new(), Player::One);

    for (id, node) in graph.nodes() {
        let board = node.board();
        assert!(node.is_explored(), "{id} left unexplored");
        assert!(
            !(board.check_win(Player::One) && board.check_win(Player::Two)),
            "{id} has two winners"
        );
        assert_eq!(board.empty_cells().len() + board.occupied_count(), 9);
        assert_eq!(graph.id_of(node.key()), Some(id));

        if node.is_leaf() {
            assert!(board.is_terminal());
            assert_eq!(node.tally().total(), 1);
            let expected = match board.winner() {
                Some(Player::One) => 1,
                Some(Player::Two) => -1,
                None => 0,
            };
            assert_eq!(node.score(), expected);
            continue;
        }

        assert!(!board.is_terminal());
        assert_eq!(node.children().len(), board.empty_cells().len());

        let children: Vec<_> = graph.children(id).collect();
        let sum: Tally = children.iter().map(|child| child.tally()).sum();
        assert_eq!(node.tally(), sum, "{id}");

        let scores = children.iter().map(|child| child.score());
        let expected = match node.turn() {
            Player::One => scores.max(),
            Player::Two => scores.min(),
        };
        assert_eq!(Some(node.score()), expected, "{id}");

        for child in children {
            assert_eq!(child.turn(), node.turn().opponent());
            assert_eq!(child.board().occupied_count(), board.occupied_count() + 1);
        }
    }
}

#[test]
fn rebuild_is_deterministic() {
    let first = StateGraph::build(BoardState::new(), Player::One);
    let second = StateGraph::build(BoardState::new(), Player::One);

    assert_eq!(first.len(), second.len());
    for ((a_id, a), (b_id, b)) in first.nodes().zip(second.nodes()) {
        assert_eq!(a_id, b_id);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.tally(), b.tally());
        assert_eq!(a.children(), b.children());
    }
}

#[test]
fn partial_board_scores_follow_the_player_to_move() {
    let board = BoardState::from_string("XX. OO. OX.").unwrap();

    let engine_to_move = StateGraph::build(board, Player::One);
    assert_eq!(engine_to_move.root().score(), 1);
    assert_eq!(engine_to_move.root().tally(), Tally::new(2, 3, 0));

    let human_to_move = StateGraph::build(board, Player::Two);
    assert_eq!(human_to_move.root().score(), -1);
}

#[test]
fn terminal_start_is_a_single_leaf() {
    let board = BoardState::from_string("XXX OO. ...").unwrap();
    let graph = StateGraph::build(board, Player::Two);

    assert_eq!(graph.len(), 1);
    assert!(graph.root().is_leaf());
    assert_eq!(graph.root().score(), 1);
    assert_eq!(graph.root().tally(), Tally::WIN);
}
