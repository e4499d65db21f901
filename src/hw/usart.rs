// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer for the command link.
//!
//! The transmit half is polled. Every `\n` goes out as `\r\n` so that plain terminals show one
//! reply per line. The receive half raises an interrupt per byte; the interrupt handler drains it
//! into the protocol receive queue.
//!
//! To access the link from a host machine, connect to the USB-serial adapter and use
//! ```text
//! $ screen /dev/ttyUSB0 9600
//! ```

use nb::block;

use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Pins, Rx, Serial, Tx},
};

/// Split a configured serial port into the link halves.
pub fn split<U: Instance, PINS: Pins<U>>(serial: Serial<U, PINS>) -> (UsartTx<U>, UsartRx<U>) {
    let (tx, rx) = serial.split();
    (UsartTx { tx }, UsartRx { rx })
}

pub struct UsartTx<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> UsartTx<U> {
    #[inline]
    fn put(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    /// Write one byte, expanding `\n` to `\r\n`.
    pub fn write_byte(&mut self, b: u8) {
        if b == b'\n' {
            self.put(b'\r');
        }
        self.put(b);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

pub struct UsartRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> UsartRx<U> {
    /// Next received byte, if any. Framing and overrun errors drop the byte.
    pub fn read(&mut self) -> Option<u8> {
        loop {
            match self.rx.read() {
                Ok(b) => return Some(b),
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(_)) => continue,
            }
        }
    }
}

impl UsartRx<pac::USART1> {
    /// Raise the USART1 interrupt whenever a byte is received.
    pub fn listen(&mut self) {
        let usart = unsafe { &*pac::USART1::ptr() };
        usart.cr1.modify(|_, w| w.rxneie().set_bit());
    }
}
