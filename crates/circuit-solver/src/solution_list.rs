//! Best solutions found so far.
//!
//! Solutions rank by tap count, then by action count. Only the best rank is
//! kept, and boards that match an already stored one (ignoring rotation
//! counters) are dropped.

use std::cmp::Ordering;

use crate::configuration::Configuration;

/// Deduplicated set of the best solutions seen
#[derive(Debug, Clone, Default)]
pub struct SolutionList {
    best: Option<(u8, u8)>,
    solutions: Vec<Configuration>,
}

impl SolutionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a solved configuration.
    pub fn append(&mut self, config: &Configuration) {
        let rank = (config.tap_count(), config.action_count());
        match self.best.map(|best| rank.cmp(&best)) {
            None | Some(Ordering::Less) => {
                self.best = Some(rank);
                self.solutions.clear();
                self.solutions.push(config.clone());
            }
            Some(Ordering::Greater) => {}
            Some(Ordering::Equal) => {
                if !self.contains(config) {
                    self.solutions.push(config.clone());
                }
            }
        }
    }

    fn contains(&self, config: &Configuration) -> bool {
        self.solutions
            .iter()
            .any(|solution| solution.board().normalized_eq(config.board()))
    }

    /// Whether the stored rank beats `(tap_count, action_count)` outright.
    pub fn dominates(&self, tap_count: u8, action_count: u8) -> bool {
        self.best
            .is_some_and(|best| (tap_count, action_count) > best)
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Best `(tap_count, action_count)`
    pub fn best(&self) -> Option<(u8, u8)> {
        self.best
    }

    pub fn tap_count(&self) -> Option<u8> {
        self.best.map(|(taps, _)| taps)
    }

    pub fn action_count(&self) -> Option<u8> {
        self.best.map(|(_, actions)| actions)
    }

    pub fn solutions(&self) -> &[Configuration] {
        &self.solutions
    }

    /// Merge another list using the same ranking, e.g. from an independent
    /// sub-search.
    pub fn merge(&mut self, other: &SolutionList) {
        for solution in &other.solutions {
            self.append(solution);
        }
    }
}
