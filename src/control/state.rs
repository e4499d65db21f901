// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Current and previous mode/parameter, owned by the main loop.

use crate::protocol::{Event, Mode};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModeState {
    current: Mode,
    previous: Mode,
    parameter: i32,
    previous_parameter: i32,
}

impl ModeState {
    pub const fn new() -> Self {
        Self {
            current: Mode::Idle,
            previous: Mode::Idle,
            parameter: 0,
            previous_parameter: 0,
        }
    }

    /// Apply a parsed command line.
    ///
    /// Every event first remembers the current mode and parameter, so handlers can return to what
    /// was running before. An unmatched word stops there.
    pub fn apply(&mut self, event: Event) {
        self.previous = self.current;
        self.previous_parameter = self.parameter;

        if let Event::Command(cmd) = event {
            self.current = cmd.mode;
            if let Some(p) = cmd.parameter {
                self.parameter = p;
            }
        }
    }

    #[inline]
    pub fn set_current(&mut self, mode: Mode) {
        self.current = mode;
    }

    #[inline]
    pub fn current(&self) -> Mode {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> Mode {
        self.previous
    }

    #[inline]
    pub fn parameter(&self) -> i32 {
        self.parameter
    }

    #[inline]
    pub fn previous_parameter(&self) -> i32 {
        self.previous_parameter
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}
