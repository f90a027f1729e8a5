// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Learner × class spike tallies collected during evaluation.

use serde::Serialize;

use sem_structures::{Result, SemError};

/// Spike counts per learner and stimulus class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseStats {
    nb_classes: usize,
    /// `counts[learner][class]`
    counts: Vec<Vec<usize>>,
}

impl ResponseStats {
    pub fn new(nb_learners: usize, nb_classes: usize) -> Self {
        Self {
            nb_classes,
            counts: vec![vec![0; nb_classes]; nb_learners],
        }
    }

    pub fn nb_learners(&self) -> usize {
        self.counts.len()
    }

    pub fn nb_classes(&self) -> usize {
        self.nb_classes
    }

    /// Add the spikes each learner emitted while a stimulus of `class` was shown.
    ///
    /// # Errors
    /// - `SemError::Shape` if `spike_counts` does not have one entry per learner
    /// - `SemError::Value` if `class` is out of range
    pub fn record(&mut self, class: usize, spike_counts: &[usize]) -> Result<()> {
        if spike_counts.len() != self.counts.len() {
            return Err(SemError::shape(format!(
                "expected {} spike counts, got {}",
                self.counts.len(),
                spike_counts.len()
            )));
        }
        if class >= self.nb_classes {
            return Err(SemError::value(format!(
                "class {} out of range for {} classes",
                class, self.nb_classes
            )));
        }

        for (row, &count) in self.counts.iter_mut().zip(spike_counts) {
            row[class] += count;
        }
        Ok(())
    }

    pub fn count(&self, learner: usize, class: usize) -> usize {
        self.counts
            .get(learner)
            .and_then(|row| row.get(class))
            .copied()
            .unwrap_or(0)
    }

    pub fn learner_total(&self, learner: usize) -> usize {
        self.counts.get(learner).map(|row| row.iter().sum()).unwrap_or(0)
    }

    pub fn total_spikes(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Class `learner` fired for most; lowest index wins ties. `None` if it never fired.
    pub fn preferred_class(&self, learner: usize) -> Option<usize> {
        let row = self.counts.get(learner)?;
        let (class, &best) = row
            .iter()
            .enumerate()
            .fold(None, |acc: Option<(usize, &usize)>, (c, n)| match acc {
                Some((_, m)) if m >= n => acc,
                _ => Some((c, n)),
            })?;
        (best > 0).then_some(class)
    }

    /// Fraction of all spikes emitted for each learner's preferred class.
    ///
    /// 1.0 means every learner fires for a single class only; 0.0 when no spike
    /// was recorded.
    pub fn purity(&self) -> f64 {
        let total = self.total_spikes();
        if total == 0 {
            return 0.0;
        }
        let dominant: usize = self
            .counts
            .iter()
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .sum();
        dominant as f64 / total as f64
    }

    /// Number of distinct classes claimed as preferred by at least one learner
    pub fn classes_covered(&self) -> usize {
        let mut covered = vec![false; self.nb_classes];
        for learner in 0..self.nb_learners() {
            if let Some(class) = self.preferred_class(learner) {
                covered[class] = true;
            }
        }
        covered.into_iter().filter(|&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_preferred_class() {
        let mut stats = ResponseStats::new(2, 3);
        stats.record(0, &[5, 0]).unwrap();
        stats.record(2, &[1, 4]).unwrap();
        stats.record(1, &[0, 4]).unwrap();

        assert_eq!(stats.count(0, 0), 5);
        assert_eq!(stats.preferred_class(0), Some(0));
        // tie between class 1 and 2 resolves to the lower index
        assert_eq!(stats.preferred_class(1), Some(1));
        assert_eq!(stats.total_spikes(), 14);
        assert_eq!(stats.classes_covered(), 2);
    }

    #[test]
    fn test_silent_learner_has_no_preference() {
        let stats = ResponseStats::new(1, 2);
        assert_eq!(stats.preferred_class(0), None);
        assert_eq!(stats.purity(), 0.0);
    }

    #[test]
    fn test_purity() {
        let mut stats = ResponseStats::new(2, 2);
        stats.record(0, &[3, 0]).unwrap();
        stats.record(1, &[1, 4]).unwrap();
        // dominant: 3 + 4 of 8
        assert!((stats.purity() - 7.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_record_errors() {
        let mut stats = ResponseStats::new(2, 2);
        assert!(matches!(stats.record(0, &[1]), Err(SemError::Shape(_))));
        assert!(matches!(stats.record(2, &[1, 1]), Err(SemError::Value(_))));
        assert_eq!(stats.total_spikes(), 0);
    }
}
