//! Headless analysis CLI for the tic-tac-toe solver.
//!
//! Analyzes positions and runs perfect-vs-perfect self-play from the
//! command line. This is a diagnostic surface for the solver library; it
//! owns no game loop of its own.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_core::{Board, Player, rules};
use tictactoe_solver::{Solver, selfplay};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Tic-tac-toe solver - exact minimax analysis
#[derive(Parser, Debug)]
#[command(name = "ttt-solve")]
#[command(about = "Exact tic-tac-toe solver with win-probability estimates", long_about = None)]
#[command(version)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a position and report the best move with win probability
    Analyze {
        /// Board label, row-major: X, O or . for each of the 9 squares
        label: String,

        /// Side the solver plays
        #[arg(short, long, default_value = "O")]
        side: Player,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Play the solver against itself from the empty board
    Selfplay,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { label, side, json } => run_analyze(&label, side, json),
        Command::Selfplay => run_selfplay(),
    }
}

/// Analyze a single position for the given side.
fn run_analyze(label: &str, side: Player, json: bool) -> Result<()> {
    let board: Board = label.parse()?;
    info!(%side, board = %board.label(), "Analyzing position");

    let status = rules::status(&board);
    if status.is_terminal() {
        anyhow::bail!("Position is already decided: {}", status);
    }

    let solver = Solver::new(side);
    let scored = solver.score_moves(&board);
    let decision = solver.choose_move(&board)?;

    if json {
        let candidates: Vec<_> = scored
            .iter()
            .map(|(pos, score)| {
                serde_json::json!({
                    "index": pos.to_index(),
                    "position": pos.label(),
                    "score": score,
                })
            })
            .collect();
        let report = serde_json::json!({
            "board": board.label(),
            "side": side.to_string(),
            "move": {
                "index": decision.position.to_index(),
                "position": decision.position.label(),
            },
            "probability": decision.probability,
            "candidates": candidates,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", board);
    println!();
    for (pos, score) in &scored {
        println!("  {:>13} (index {}): {:+}", pos.label(), pos.to_index(), score);
    }
    println!();
    println!(
        "{} plays {} (index {}) with win probability {:.1}%",
        side,
        decision.position.label(),
        decision.position.to_index(),
        decision.probability * 100.0
    );
    Ok(())
}

/// Run perfect-vs-perfect self-play and print the transcript.
fn run_selfplay() -> Result<()> {
    info!("Running perfect-vs-perfect self-play");

    let playout = selfplay::play_out(&Solver::new(Player::X), &Solver::new(Player::O))?;

    for (ply, mov) in playout.moves.iter().enumerate() {
        println!(
            "{:>2}. {} -> {:>13} (win probability {:.1}%)",
            ply + 1,
            mov.player,
            mov.position.label(),
            mov.probability * 100.0
        );
    }
    println!();
    println!("{}", playout.board);
    println!();
    println!("Result: {}", playout.status);
    Ok(())
}
