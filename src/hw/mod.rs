// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level wrappers. Only built for the board target.

pub mod adc;
pub mod gpio;
pub mod pins;
pub mod pwm;
pub mod tick;
pub mod usart;

pub use adc::Adc;
pub use gpio::{DirPin, PortBInputs};
pub use pins::BoardPins;
pub use pwm::Pwm4Channel;
pub use tick::SampleTick;
pub use usart::{UsartRx, UsartTx};
