// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! SpikingHistory - fixed-window record of which afferent lines fired.
//!
//! Key semantics:
//! - Dense: one frame per tick, silent ticks included.
//! - Bounded: capacity is fixed at construction, the oldest frame is evicted first.
//! - Indexed backward: offset 0 is the most recent frame.

use std::collections::VecDeque;

use sem_structures::{Result, SemError};

/// Spike frames for a fixed number of input lines over the last `capacity` ticks.
#[derive(Debug, Clone)]
pub struct SpikingHistory {
    capacity: usize,
    nb_lines: usize,
    frames: VecDeque<Vec<bool>>, // oldest -> newest
}

impl SpikingHistory {
    /// # Errors
    /// `SemError::Value` if `capacity` is zero.
    pub fn new(nb_lines: usize, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SemError::value("spiking history length must be > 0"));
        }
        Ok(Self {
            capacity,
            nb_lines,
            frames: VecDeque::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn nb_lines(&self) -> usize {
        self.nb_lines
    }

    /// Number of frames recorded so far, never more than `capacity`
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Advance by one tick, recording which lines fired.
    ///
    /// # Errors
    /// `SemError::Shape` if `fired` does not cover every line.
    pub fn push(&mut self, fired: &[bool]) -> Result<()> {
        if fired.len() != self.nb_lines {
            return Err(SemError::shape(format!(
                "spike frame has {} lines, history tracks {}",
                fired.len(),
                self.nb_lines
            )));
        }

        self.frames.push_back(fired.to_vec());
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
        Ok(())
    }

    /// Ticks since `line` last fired (0 = most recent frame), or `None` if it
    /// stayed silent for the whole window.
    pub fn time_since_last_fire(&self, line: usize) -> Option<usize> {
        self.frames
            .iter()
            .rev()
            .position(|frame| frame.get(line).copied().unwrap_or(false))
    }

    /// Drop every recorded frame
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
