//! Analyze command - Build the full state graph and report its statistics
//!
//! Prints state counts, the root's minimax value and outcome tallies, the
//! statistics of every opening move and the move each algorithm would pick,
//! and optionally exports every node to CSV.

use std::{collections::BTreeMap, path::Path, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    Algorithm, StateGraph, Tally,
    cli::output::{create_spinner, format_number, print_kv, print_section, print_subsection},
    graph::Score,
    strategy::best_children,
    tictactoe::{BoardState, Player, Position},
};

#[derive(Parser, Debug, Clone)]
#[command(about = "Build the state graph and report its statistics")]
pub struct AnalyzeArgs {
    /// Who moves first from the empty board (computer, human)
    #[arg(long, default_value = "computer")]
    pub first: String,

    /// Export every state to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Statistics of one move out of the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningStats {
    pub position: Position,
    pub score: Score,
    pub tally: Tally,
}

/// Everything the report prints, computed up front
#[derive(Debug, Clone)]
pub struct GraphSummary {
    pub starting_player: Player,
    pub states: usize,
    pub terminals: usize,
    pub edges: usize,
    pub root_score: Score,
    pub root_tally: Tally,
    /// Number of states per count of occupied cells
    pub by_depth: BTreeMap<usize, usize>,
    pub openings: Vec<OpeningStats>,
    /// Equal-best root moves per ranked algorithm
    pub choices: Vec<(Algorithm, Vec<Position>)>,
}

/// One CSV row per graph node
#[derive(Debug, Serialize)]
struct NodeRow {
    state: String,
    turn: u8,
    depth: usize,
    score: Score,
    win: u64,
    loss: u64,
    draw: u64,
    children: usize,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let starting_player: Player = args.first.parse()?;

    let spinner = create_spinner("Building state graph...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let graph = StateGraph::build(BoardState::new(), starting_player);
    spinner.finish_and_clear();

    print_report(&summarize(&graph));

    if let Some(path) = args.export {
        export_graph(&graph, &path)
            .with_context(|| format!("failed to export state graph to {}", path.display()))?;
        println!("\nState graph exported to: {}", path.display());
    }

    Ok(())
}

pub fn summarize(graph: &StateGraph) -> GraphSummary {
    let root = graph.root();
    let root_board = root.board();

    let mut by_depth = BTreeMap::new();
    for (_, node) in graph.nodes() {
        *by_depth.entry(node.board().occupied_count()).or_insert(0) += 1;
    }

    let children: Vec<_> = graph.children(graph.root_id()).collect();
    let openings: Vec<OpeningStats> = children
        .iter()
        .filter_map(|child| {
            root_board
                .find_changed_position(child.board())
                .map(|position| OpeningStats {
                    position,
                    score: child.score(),
                    tally: child.tally(),
                })
        })
        .collect();

    let choices = Algorithm::ALL
        .iter()
        .filter(|&&algorithm| algorithm != Algorithm::Random)
        .map(|&algorithm| {
            let positions: Vec<Position> = best_children(algorithm, &children)
                .into_iter()
                .filter_map(|i| root_board.find_changed_position(children[i].board()))
                .collect();
            (algorithm, positions)
        })
        .collect();

    GraphSummary {
        starting_player: root.turn(),
        states: graph.len(),
        terminals: graph.terminal_count(),
        edges: graph.edge_count(),
        root_score: root.score(),
        root_tally: root.tally(),
        by_depth,
        openings,
        choices,
    }
}

fn print_report(summary: &GraphSummary) {
    print_section("State Graph Statistics");
    print_kv("Starting player", &summary.starting_player.to_string());
    print_kv("States", &format_number(summary.states as u64));
    print_kv("Terminal states", &format_number(summary.terminals as u64));
    print_kv("Edges", &format_number(summary.edges as u64));
    print_kv("Root minimax", &summary.root_score.to_string());
    print_kv("Root wins", &format_number(summary.root_tally.win));
    print_kv("Root losses", &format_number(summary.root_tally.loss));
    print_kv("Root draws", &format_number(summary.root_tally.draw));
    print_kv("Complete games", &format_number(summary.root_tally.total()));

    print_subsection("States by depth");
    for (depth, count) in &summary.by_depth {
        println!("  Depth {depth}: {} states", format_number(*count as u64));
    }

    print_subsection("Opening moves");
    println!(
        "  {:<10} {:>6} {:>10} {:>10} {:>10}",
        "Move", "Score", "Wins", "Losses", "Draws"
    );
    for opening in &summary.openings {
        println!(
            "  {:<10} {:>6} {:>10} {:>10} {:>10}",
            opening.position.to_string(),
            opening.score,
            format_number(opening.tally.win),
            format_number(opening.tally.loss),
            format_number(opening.tally.draw)
        );
    }

    print_subsection("Root choice by algorithm");
    for (algorithm, positions) in &summary.choices {
        let listed: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
        print_kv(algorithm.label(), &listed.join(" "));
    }
}

/// Write every node of `graph` to `path` as CSV
pub fn export_graph(graph: &StateGraph, path: &Path) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (_, node) in graph.nodes() {
        let tally = node.tally();
        writer.serialize(NodeRow {
            state: node.board().encode(node.turn()),
            turn: match node.turn() {
                Player::One => 1,
                Player::Two => 2,
            },
            depth: node.board().occupied_count(),
            score: node.score(),
            win: tally.win,
            loss: tally.loss,
            draw: tally.draw,
            children: node.children().len(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
