//! Per-level search statistics.
//!
//! A run picks one [`SearchLog`] at startup: [`TableLog`] writes a
//! semicolon-separated table of every search followed by totals, while
//! [`NullLog`] discards everything.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::solver::SolverResult;

/// Levels written between flushes
const FLUSH_EVERY: u64 = 10;

/// Outcome of one search, as recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub solutions_checked: u64,
    pub elapsed: Duration,
    /// Tap and action count of the best solution
    pub best: Option<(u8, u8)>,
}

impl From<&SolverResult> for SearchStats {
    fn from(result: &SolverResult) -> Self {
        Self {
            solutions_checked: result.solutions_checked,
            elapsed: result.elapsed,
            best: result.solutions.best(),
        }
    }
}

/// Sink for search statistics
pub trait SearchLog {
    /// A search of `level` begins.
    fn start_search(&mut self, level: &str);

    /// The search begun last has ended.
    fn stop_search(&mut self, stats: &SearchStats) -> io::Result<()>;

    /// No more searches follow.
    fn finish(&mut self) -> io::Result<()>;
}

/// Discards all statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl SearchLog for NullLog {
    fn start_search(&mut self, _level: &str) {}

    fn stop_search(&mut self, _stats: &SearchStats) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one table row per search and a totals row on [`SearchLog::finish`].
#[derive(Debug)]
pub struct TableLog<W: Write> {
    out: W,
    current_level: String,
    level_count: u64,
    solved_count: u64,
    total_checked: u64,
    total_time: Duration,
}

impl TableLog<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: &Path, header: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        TableLog::new(BufWriter::new(file), header)
    }
}

impl<W: Write> TableLog<W> {
    /// Start a table under `header`, usually the command line of the run.
    pub fn new(mut out: W, header: &str) -> io::Result<Self> {
        writeln!(out, "{header}")?;
        writeln!(
            out,
            "{:>16};{:>19};{:>19};{:>5};{:>8}",
            "level", "solutions", "nanoseconds", "taps", "actions"
        )?;
        Ok(Self {
            out,
            current_level: String::new(),
            level_count: 0,
            solved_count: 0,
            total_checked: 0,
            total_time: Duration::ZERO,
        })
    }

    pub fn level_count(&self) -> u64 {
        self.level_count
    }

    pub fn solved_count(&self) -> u64 {
        self.solved_count
    }

    /// Percentage of logged levels that were solved
    pub fn solved_percentage(&self) -> f64 {
        if self.level_count == 0 {
            0.0
        } else {
            100.0 * self.solved_count as f64 / self.level_count as f64
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SearchLog for TableLog<W> {
    fn start_search(&mut self, level: &str) {
        self.current_level = level.to_string();
    }

    fn stop_search(&mut self, stats: &SearchStats) -> io::Result<()> {
        self.level_count += 1;
        self.total_checked += stats.solutions_checked;
        self.total_time += stats.elapsed;

        write!(
            self.out,
            "{:>16};{:>19};{:>19};",
            self.current_level,
            stats.solutions_checked,
            stats.elapsed.as_nanos()
        )?;
        match stats.best {
            Some((taps, actions)) => {
                self.solved_count += 1;
                writeln!(self.out, "{taps:>5};{actions:>8}")?;
            }
            None => writeln!(self.out, "{:>5};{:>8}", "---", "---")?,
        }

        if self.level_count % FLUSH_EVERY == 0 {
            self.out.flush()?;
        }
        self.current_level.clear();
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out, "{:-^60}", " totals ")?;
        writeln!(
            self.out,
            "{:>16};{:>19};{:>19};{:>5};{:>7.2}%",
            self.level_count,
            self.total_checked,
            self.total_time.as_nanos(),
            self.solved_count,
            self.solved_percentage()
        )?;
        self.out.flush()
    }
}
