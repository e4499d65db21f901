// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command vocabulary of the Krone serial protocol.
//!
//! Commands are single ASCII lines. A group letter (`M` or `K`) is followed by a selector letter
//! and, for some selectors, a decimal parameter. `ping` and `help` are literal words.

pub const TERMINATOR_LF: u8 = b'\n';
pub const TERMINATOR_CR: u8 = b'\r';

/// Group letters.
pub const GROUP_MODULE: u8 = b'M';
pub const GROUP_KINEMATICS: u8 = b'K';

/// First letters of the literal word commands.
pub const WORD_PING: u8 = b'p';
pub const WORD_HELP: u8 = b'h';

/// Reply lines for `Mn`.
pub const IDENTIFY_REPLY: [&[u8]; 3] = [b"rKrone", b"t100", b"sC007"];

/// Reply line for `ping`.
pub const PING_REPLY: &[u8] = b"pong";

/// Banner and command reference printed for `help`.
pub const HELP_TEXT: [&[u8]; 19] = [
    b"+-------------- Krone --------------+",
    b"|        Firmware version 1.0       |",
    b"+-----------------------------------+",
    b"",
    b"Krone commands ['*' takes a parameter]",
    b"",
    b" Mn          - identify",
    b" Ms          - start sensor stream",
    b" Mf          - stop sensor stream",
    b"*Me,Md       - drive left, right motor",
    b"*Mo,Mp,Mq,Mr - drive servo O, P, Q, R",
    b"*MM          - start sound",
    b" Mm          - stop sound",
    b" Ks          - brake both motors",
    b"*Kf,Kb       - drive forward, backward",
    b"*Kr,Kl       - turn right, left",
    b"",
    b" help        - this text",
    b" ping        - answers \"pong\"",
];

/// Returns `true` for the bytes that end a command line.
#[inline]
pub fn is_terminator(byte: u8) -> bool {
    byte == TERMINATOR_LF || byte == TERMINATOR_CR
}

/// Operating mode driving the main loop.
///
/// Servo and sound modes are accepted on the wire but have no handler on this board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Idle,
    Ping,
    Identify,
    SensorStream,
    SensorStop,
    MotorLeft,
    MotorRight,
    ServoO,
    ServoP,
    ServoQ,
    ServoR,
    Sound,
    SoundStop,
    MotorStop,
    MotorForward,
    MotorBackward,
    MotorTurnLeft,
    MotorTurnRight,
    Help,
}

impl Mode {
    /// Mode selected by the byte following `M`, and whether it takes a parameter.
    pub fn from_module_selector(byte: u8) -> Option<(Mode, bool)> {
        match byte {
            b'n' => Some((Mode::Identify, false)),
            b's' => Some((Mode::SensorStream, false)),
            b'f' => Some((Mode::SensorStop, false)),
            b'e' => Some((Mode::MotorLeft, true)),
            b'd' => Some((Mode::MotorRight, true)),
            b'o' => Some((Mode::ServoO, true)),
            b'p' => Some((Mode::ServoP, true)),
            b'q' => Some((Mode::ServoQ, true)),
            b'r' => Some((Mode::ServoR, true)),
            b'M' => Some((Mode::Sound, true)),
            b'm' => Some((Mode::SoundStop, false)),
            _ => None,
        }
    }

    /// Mode selected by the byte following `K`, and whether it takes a parameter.
    pub fn from_kinematics_selector(byte: u8) -> Option<(Mode, bool)> {
        match byte {
            b's' => Some((Mode::MotorStop, false)),
            b'f' => Some((Mode::MotorForward, true)),
            b'b' => Some((Mode::MotorBackward, true)),
            b'r' => Some((Mode::MotorTurnRight, true)),
            b'l' => Some((Mode::MotorTurnLeft, true)),
            _ => None,
        }
    }
}

/// A fully parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub mode: Mode,
    /// Present only for selectors that carry a parameter. Always within `0..=9999`.
    pub parameter: Option<i32>,
}

impl Command {
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            parameter: None,
        }
    }

    pub const fn with_parameter(mode: Mode, parameter: i32) -> Self {
        Self {
            mode,
            parameter: Some(parameter),
        }
    }
}

/// Outcome of one command line, handed from the receive interrupt to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Switch to a new mode.
    Command(Command),
    /// A literal word started but did not match. The previous mode is remembered, the current
    /// mode is left alone.
    Unmatched,
}
