// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Receive side of the serial link, driven from the USART receive interrupt.
//!
//! Every received byte goes into the ring buffer. The parser only runs when a line terminator
//! arrives, so a command line is parsed once it is complete. Each terminator consumes its whole
//! line, so a malformed or overlong line never leaves bytes behind for the next one.

use heapless::spsc::Producer;

use crate::protocol::messages::{is_terminator, Event};
use crate::protocol::parser::Parser;
use crate::protocol::rx_queue::RxQueue;

pub struct RxLink<const N: usize> {
    queue: RxQueue<N>,
    parser: Parser,
}

impl<const N: usize> RxLink<N> {
    pub const fn new() -> Self {
        Self {
            queue: RxQueue::new(),
            parser: Parser::new(),
        }
    }

    /// Handle one received byte. Returns the event for a completed command line, if any.
    pub fn on_byte(&mut self, byte: u8) -> Option<Event> {
        let accepted = self.queue.push(byte).is_ok();
        if !accepted {
            warn!(
                "rx queue full, dropped {=u8:#x} ({=u32} so far)",
                byte,
                self.queue.dropped()
            );
        }
        if !is_terminator(byte) {
            return None;
        }

        let mut event = self.parser.feed(&mut self.queue);
        if !accepted {
            // The line outgrew the buffer. Its terminator still ends what was kept.
            if event.is_none() {
                event = self.parser.push(byte);
            }
            self.queue.clear();
        }

        if let Some(event) = event {
            debug!("parsed {}", event);
        }
        event
    }

    /// Handle one received byte and post a completed command to the main loop.
    ///
    /// A full mailbox drops the new command.
    pub fn receive<const M: usize>(&mut self, byte: u8, mailbox: &mut Producer<'_, Event, M>) {
        if let Some(event) = self.on_byte(byte) {
            if mailbox.enqueue(event).is_err() {
                warn!("mailbox full, dropped {}", event);
            }
        }
    }
}

impl<const N: usize> Default for RxLink<N> {
    fn default() -> Self {
        Self::new()
    }
}
