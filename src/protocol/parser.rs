// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line parser for the Krone command protocol.
//!
//! The parser is a byte-at-a-time state machine. It never waits for input: when a command needs
//! more bytes than are currently buffered it keeps its state and resumes on the next call.

use crate::config::MAX_PARAMETER_DIGITS;
use crate::protocol::messages::*;
use crate::protocol::rx_queue::RxQueue;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Waiting for the first byte of a command.
    Start,
    /// Got a group letter, waiting for the selector.
    Selector { group: u8 },
    /// Matching the remaining letters of a literal word.
    Word {
        rest: &'static [u8],
        mode: Mode,
    },
    /// Collecting decimal digits for a parameter.
    Digits { mode: Mode, value: i32, count: u8 },
}

pub struct Parser {
    state: State,
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            state: State::Start,
        }
    }

    /// Process a single byte. Returns `Some(Event)` when a command line is resolved.
    pub fn push(&mut self, byte: u8) -> Option<Event> {
        match self.state {
            State::Start => self.start(byte),
            State::Selector { group } => {
                self.state = State::Start;
                let selected = match group {
                    GROUP_MODULE => Mode::from_module_selector(byte),
                    _ => Mode::from_kinematics_selector(byte),
                };
                match selected {
                    Some((mode, true)) => {
                        self.state = State::Digits {
                            mode,
                            value: 0,
                            count: 0,
                        };
                        None
                    }
                    Some((mode, false)) => Some(Event::Command(Command::new(mode))),
                    None => Some(Event::Command(Command::new(Mode::Idle))),
                }
            }
            State::Word { rest, mode } => {
                if byte != rest[0] {
                    self.state = State::Start;
                    return Some(Event::Unmatched);
                }
                if rest.len() == 1 {
                    self.state = State::Start;
                    return Some(Event::Command(Command::new(mode)));
                }
                self.state = State::Word {
                    rest: &rest[1..],
                    mode,
                };
                None
            }
            State::Digits { mode, value, count } => {
                if byte.is_ascii_digit() {
                    let value = value * 10 + i32::from(byte - b'0');
                    let count = count + 1;
                    if count == MAX_PARAMETER_DIGITS {
                        self.state = State::Start;
                        return Some(Event::Command(Command::with_parameter(mode, value)));
                    }
                    self.state = State::Digits { mode, value, count };
                } else if count > 0 && is_terminator(byte) {
                    self.state = State::Start;
                    return Some(Event::Command(Command::with_parameter(mode, value)));
                }
                None
            }
        }
    }

    fn start(&mut self, byte: u8) -> Option<Event> {
        match byte {
            // Blank lines and CR/LF pairs never change the mode.
            TERMINATOR_LF | TERMINATOR_CR => None,
            GROUP_MODULE | GROUP_KINEMATICS => {
                self.state = State::Selector { group: byte };
                None
            }
            WORD_PING => {
                self.state = State::Word {
                    rest: b"ing",
                    mode: Mode::Ping,
                };
                None
            }
            WORD_HELP => {
                self.state = State::Word {
                    rest: b"elp",
                    mode: Mode::Help,
                };
                None
            }
            _ => Some(Event::Command(Command::new(Mode::Idle))),
        }
    }

    /// Drain buffered bytes until one command line resolves or the queue runs dry.
    ///
    /// A command that resolves before its line ends takes the rest of that line with it, up to and
    /// including the terminator. Any run of terminators left at the head of the queue is discarded
    /// as well. Bytes after that stay queued for the next call.
    pub fn feed<const N: usize>(&mut self, queue: &mut RxQueue<N>) -> Option<Event> {
        while let Some(byte) = queue.pop() {
            if let Some(event) = self.push(byte) {
                if !is_terminator(byte) {
                    while queue.pop().map_or(false, |b| !is_terminator(b)) {}
                }
                while queue.peek().map_or(false, is_terminator) {
                    let _ = queue.pop();
                }
                return Some(event);
            }
        }
        None
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
