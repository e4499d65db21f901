// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Krone Firmware
//!
//! Control firmware for the Krone two-wheeled robot, written in Rust, targeting an STM32F777 MCU.
//! The board takes single-line ASCII commands over a serial link, keeps a current operating mode,
//! samples its sensors on a timer and drives two motors through PWM H-bridges.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Receive queue, command parser and command vocabulary |
//! | [`control`] | Mode state, mode handlers and the cooperative scheduler |
//! | [`drivers`] | Device-level drivers (H-bridge, motor pair) |
//! | [`sensors`] | Sensor snapshot and the timer-driven sampler |
//! | `hw` | MCU-level wrappers around USART, ADC, timers and GPIO (board builds only) |
//! | [`config`] | Compile-time board constants |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! Logging over RTT is enabled with the `defmt` feature.
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

// This must go first so the logging macros are visible to the modules below.
mod fmt;

pub mod config;
pub mod control;
pub mod drivers;
pub mod protocol;
pub mod sensors;

#[cfg(target_os = "none")]
pub mod hw;

#[cfg(test)]
mod test_util;
