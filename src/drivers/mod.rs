// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic.
//!
//! ## Existing drivers
//!
//! - [`h_bridge`] – dual-input H-bridge channel with PWM enable (L293D or compatible)
//! - [`motor_pair`] – left/right drive motors addressed by protocol motor index

pub mod h_bridge;
pub mod motor_pair;

pub use h_bridge::{Drive, HBridge};
pub use motor_pair::{MotorId, MotorPair, SpeedControl};
