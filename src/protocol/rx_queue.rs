// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-capacity receive ring buffer.
//!
//! Filled from the USART receive interrupt, drained by the command parser. When the buffer is full
//! the incoming byte is dropped and the buffered bytes are kept. One slot stays unused so that a
//! full buffer can be told apart from an empty one, so at most `N - 1` bytes are held.

use heapless::spsc::Queue;

pub struct RxQueue<const N: usize> {
    bytes: Queue<u8, N>,
    dropped: u32,
}

impl<const N: usize> RxQueue<N> {
    pub const fn new() -> Self {
        Self {
            bytes: Queue::new(),
            dropped: 0,
        }
    }

    /// Append a byte. Returns the byte back if the queue is full.
    pub fn push(&mut self, byte: u8) -> Result<(), u8> {
        match self.bytes.enqueue(byte) {
            Ok(()) => Ok(()),
            Err(byte) => {
                self.dropped = self.dropped.wrapping_add(1);
                Err(byte)
            }
        }
    }

    /// Remove and return the oldest byte.
    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.dequeue()
    }

    /// Oldest byte without removing it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.peek().copied()
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        !self.bytes.is_empty()
    }

    /// Number of buffered bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Drop every buffered byte.
    pub fn clear(&mut self) {
        while self.bytes.dequeue().is_some() {}
    }

    /// Bytes dropped on overflow since start-up.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for RxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
