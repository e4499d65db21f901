// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Serial Command Protocol
//!
//! - [`messages`] - command vocabulary, modes and fixed replies
//! - [`rx_queue`] - receive ring buffer filled by the USART interrupt
//! - [`parser`] - byte-at-a-time command line parser
//! - [`link`] - receive interrupt front end tying the two together

pub mod link;
pub mod messages;
pub mod parser;
pub mod rx_queue;

pub use link::RxLink;
pub use messages::{Command, Event, Mode};
pub use parser::Parser;
pub use rx_queue::RxQueue;
