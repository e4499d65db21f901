// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensors
//!
//! - [`snapshot`] - the latest readings and their report format
//! - [`sampler`] - timer-driven sampling over ADC and digital inputs

pub mod sampler;
pub mod snapshot;

pub use sampler::{AdcRead, DigitalInputs, SampleTimer, Sampler, SamplingSwitch};
pub use snapshot::SensorSnapshot;
