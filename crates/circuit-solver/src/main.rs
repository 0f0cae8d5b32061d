//! CLI entry point for the circuit solver.
//!
//! Usage:
//!   circuit-solver solve <level.json>... [options]
//!   circuit-solver show <level.json> [--taps x,y ...]
//!
//! Options:
//!   --min-taps <n>    Shortest solution reported (default: 0)
//!   --max-taps <n>    Longest tap sequence searched (default: 6)
//!   --no-pruning      Disable branch-and-bound pruning
//!   --no-symmetry     Disable commuting-turn reduction
//!   --log <path>      Write a table of search statistics to <path>
//!   --render          Print the replay of the first solution
//!   --out <dir>       Save the report of each solved level to <dir>/<level>.json
//!   --unsolved        Skip levels with a saved report in <dir>
//!   --dry             Solve and log without printing or saving reports
//!   --verbose         Debug logging (RUST_LOG overrides)

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use circuit_solver::level::describe_board;
use circuit_solver::solver::DEFAULT_MAX_TAPS;
use circuit_solver::{
    load_level, render_board, render_solution, solve, BoardPosition, Dimensions, Level, NullLog,
    SearchLog, SearchStats, SolverConfig, SolverResult, TableLog, TapRange,
};

#[derive(Parser)]
#[command(name = "circuit-solver")]
#[command(about = "Finds the shortest tap sequences for sliding pipe puzzles")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one or more level files and print a JSON report per level
    Solve {
        /// Level JSON files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Shortest solution reported
        #[arg(long, default_value = "0")]
        min_taps: u8,

        /// Longest tap sequence searched
        #[arg(long, default_value_t = DEFAULT_MAX_TAPS)]
        max_taps: u8,

        /// Search without branch-and-bound pruning
        #[arg(long)]
        no_pruning: bool,

        /// Search every order of commuting turns
        #[arg(long)]
        no_symmetry: bool,

        /// Write search statistics to this file
        #[arg(long, value_name = "PATH")]
        log: Option<PathBuf>,

        /// Print the replay of the first solution of each level
        #[arg(long)]
        render: bool,

        /// Save the report of every solved level into this directory
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Skip levels whose report is already saved
        #[arg(long, requires = "out")]
        unsolved: bool,

        /// Solve and log, but neither print nor save reports
        #[arg(long)]
        dry: bool,
    },
    /// Draw a level, optionally replaying taps given as x,y pairs
    Show {
        /// Level JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Taps to replay
        #[arg(long, num_args = 1.., value_parser = parse_tap)]
        taps: Vec<(u8, u8)>,
    },
}

/// Report printed for each solved level
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelReport {
    level: String,
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tap_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_count: Option<u8>,
    solutions_checked: u64,
    time_elapsed_ms: u64,
    solutions: Vec<SolutionOutput>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolutionOutput {
    taps: Vec<TapOutput>,
    actions: u8,
    board: Vec<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TapOutput {
    x: u8,
    y: u8,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let code = match cli.command {
        Commands::Solve {
            files,
            min_taps,
            max_taps,
            no_pruning,
            no_symmetry,
            log,
            render,
            out,
            unsolved,
            dry,
        } => {
            let taps = TapRange::new(min_taps, max_taps).unwrap_or_else(|e| {
                let taps = TapRange::clamped(min_taps, max_taps);
                warn!("{e}, searching {}..={} taps", taps.min(), taps.max());
                taps
            });
            let config = SolverConfig {
                taps,
                pruning: !no_pruning,
                symmetry_reduction: !no_symmetry,
            };
            let options = Output {
                render,
                dry,
                unsolved,
                dir: out,
            };
            run_solve(&files, &config, log.as_deref(), &options)
        }
        Commands::Show { file, taps } => run_show(&file, &taps),
    };
    process::exit(code);
}

/// What `solve` does with each result
#[derive(Debug, Clone, Default)]
struct Output {
    render: bool,
    dry: bool,
    unsolved: bool,
    /// Directory that saved reports go to
    dir: Option<PathBuf>,
}

impl Output {
    /// Where the report of `level` is saved, if reports are saved at all.
    fn report_path(&self, level: &str) -> Option<PathBuf> {
        let file_name = format!("{}.json", level.replace(['/', '\\'], "_"));
        self.dir.as_ref().map(|dir| dir.join(file_name))
    }
}

fn run_solve(files: &[PathBuf], config: &SolverConfig, log_path: Option<&Path>, output: &Output) -> i32 {
    let mut search_log: Box<dyn SearchLog> = match log_path {
        Some(path) => {
            let header = std::env::args().collect::<Vec<_>>().join(" ");
            match TableLog::create(path, &header) {
                Ok(table) => Box::new(table),
                Err(e) => {
                    error!("failed to create log {}: {e}", path.display());
                    return 1;
                }
            }
        }
        None => Box::new(NullLog),
    };

    if let (Some(dir), false) = (&output.dir, output.dry) {
        if let Err(e) = fs::create_dir_all(dir) {
            error!("failed to create {}: {e}", dir.display());
            return 1;
        }
    }

    let mut failed = false;
    for file in files {
        let level = match load_level(file) {
            Ok(level) => level,
            Err(e) => {
                error!("{}: {e}", file.display());
                failed = true;
                continue;
            }
        };

        // Skip levels solved by an earlier run
        let report_path = output.report_path(&level.name);
        if output.unsolved {
            if let Some(path) = report_path.as_ref().filter(|path| path.is_file()) {
                info!("{}: skipping, already solved in {}", level.name, path.display());
                continue;
            }
        }

        search_log.start_search(&level.name);
        let result = solve(&level.configuration, config);
        if let Err(e) = search_log.stop_search(&SearchStats::from(&result)) {
            warn!("failed to write search log: {e}");
        }

        match result.solutions.best() {
            Some((taps, actions)) => info!(
                "{}: solved in {taps} taps, {actions} actions ({} solutions, {} checked)",
                level.name,
                result.solutions.len(),
                result.solutions_checked
            ),
            None => info!(
                "{}: no solution within {} taps ({} checked)",
                level.name,
                config.taps.max(),
                result.solutions_checked
            ),
        }

        if output.dry {
            continue;
        }
        let json = match serde_json::to_string_pretty(&format_result(&level, &result)) {
            Ok(json) => json,
            Err(e) => {
                error!("{}: failed to encode report: {e}", level.name);
                failed = true;
                continue;
            }
        };
        println!("{json}");

        // Only solved levels are saved, so `--unsolved` retries the rest
        if let (Some(path), false) = (&report_path, result.solutions.is_empty()) {
            if let Err(e) = fs::write(path, &json) {
                error!("{}: failed to save report to {}: {e}", level.name, path.display());
                failed = true;
            }
        }
        if output.render {
            if let Some(first) = result.solutions.solutions().first() {
                match render_solution(&level.configuration, first.taps()) {
                    Ok(text) => print!("{text}"),
                    Err(e) => error!("{}: {e}", level.name),
                }
            }
        }
    }

    if let Err(e) = search_log.finish() {
        warn!("failed to write search log: {e}");
    }
    if failed {
        1
    } else {
        0
    }
}

fn run_show(file: &Path, taps: &[(u8, u8)]) -> i32 {
    let level = match load_level(file) {
        Ok(level) => level,
        Err(e) => {
            error!("{}: {e}", file.display());
            return 1;
        }
    };
    let board = level.configuration.board();
    if taps.is_empty() {
        print!("{}", render_board(board));
        return 0;
    }

    let positions = match tap_positions(board.dimensions(), taps) {
        Ok(positions) => positions,
        Err(e) => {
            error!("{}: {e}", level.name);
            return 1;
        }
    };
    match render_solution(&level.configuration, &positions) {
        Ok(text) => {
            print!("{text}");
            0
        }
        Err(e) => {
            error!("{}: {e}", level.name);
            1
        }
    }
}

fn parse_tap(arg: &str) -> Result<(u8, u8), String> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {arg:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {arg:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {arg:?}: {e}"))?;
    Ok((x, y))
}

fn tap_positions(dimensions: Dimensions, taps: &[(u8, u8)]) -> Result<Vec<BoardPosition>, String> {
    taps.iter()
        .map(|&(x, y)| {
            dimensions
                .position(x, y)
                .ok_or_else(|| format!("tap ({x}, {y}) is outside the board"))
        })
        .collect()
}

fn format_result(level: &Level, result: &SolverResult) -> LevelReport {
    let dimensions = level.configuration.board().dimensions();
    LevelReport {
        level: level.name.clone(),
        solved: !result.solutions.is_empty(),
        tap_count: result.solutions.tap_count(),
        action_count: result.solutions.action_count(),
        solutions_checked: result.solutions_checked,
        time_elapsed_ms: result.elapsed.as_millis() as u64,
        solutions: result
            .solutions
            .solutions()
            .iter()
            .map(|solution| SolutionOutput {
                taps: solution
                    .taps()
                    .iter()
                    .map(|&position| TapOutput {
                        x: dimensions.x(position),
                        y: dimensions.y(position),
                    })
                    .collect(),
                actions: solution.action_count(),
                board: describe_board(solution.board()),
            })
            .collect(),
    }
}
