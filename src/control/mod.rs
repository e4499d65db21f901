// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control
//!
//! Mode state, the per-mode handlers and the cooperative scheduler that runs them.
//!
//! ## Modules
//!
//! - [`state`] - current/previous mode and parameter.
//! - [`modes`] - one handler per mode, acting on a [`Board`].
//! - [`scheduler`] - main loop step: take a command, sleep or dispatch.

pub mod modes;
pub mod scheduler;
pub mod state;

pub use modes::Board;
pub use scheduler::{Cpu, Scheduler, Step};
pub use state::ModeState;
