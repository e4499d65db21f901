// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mode handlers.
//!
//! One handler per mode with behavior. Each reads what it needs from the [`ModeState`], acts on
//! the [`Board`] and returns the mode to run next. Handlers keep no state of their own.

use crate::config::BRAKE_SPEED;
use crate::drivers::MotorId;
use crate::control::ModeState;
use crate::protocol::messages::{HELP_TEXT, IDENTIFY_REPLY, PING_REPLY};
use crate::protocol::Mode;
use crate::sensors::snapshot::fixed_width_digits;
use crate::sensors::SensorSnapshot;

/// Everything a handler can touch.
pub trait Board {
    /// Write raw bytes to the serial link. `\n` ends a line.
    fn write(&mut self, bytes: &[u8]);

    fn set_motor_speed(&mut self, motor: MotorId, speed: i32);

    /// Start or stop the periodic sampler. Repeated calls with the same value do nothing.
    fn set_sampling(&mut self, enabled: bool);

    fn sampling_enabled(&self) -> bool;

    /// Returns `true` if the sampler stored a snapshot not yet taken.
    fn snapshot_pending(&self) -> bool;

    /// Take the newest snapshot, if one arrived since the last call.
    fn take_snapshot(&mut self) -> Option<SensorSnapshot>;

    fn write_line(&mut self, line: &[u8]) {
        self.write(line);
        self.write(b"\n");
    }
}

/// Run the handler for the current mode.
///
/// Returns `None` when the mode has no handler (idle and the reserved servo/sound modes).
pub fn dispatch<B: Board>(state: &ModeState, board: &mut B) -> Option<Mode> {
    let next = match state.current() {
        Mode::Idle
        | Mode::ServoO
        | Mode::ServoP
        | Mode::ServoQ
        | Mode::ServoR
        | Mode::Sound
        | Mode::SoundStop => return None,
        Mode::Ping => ping(state, board),
        Mode::Identify => identify(state, board),
        Mode::Help => help(state, board),
        Mode::SensorStream => sensor_stream(board),
        Mode::SensorStop => sensor_stop(board),
        Mode::MotorLeft => motor_single(state, board, MotorId::Left),
        Mode::MotorRight => motor_single(state, board, MotorId::Right),
        Mode::MotorStop => motor_stop(state, board),
        Mode::MotorForward => motor_both(state, board, state.parameter()),
        Mode::MotorBackward => motor_both(state, board, -state.parameter()),
        Mode::MotorTurnLeft => motor_turn(state, board, state.parameter(), 0),
        Mode::MotorTurnRight => motor_turn(state, board, 0, state.parameter()),
    };
    Some(next)
}

fn ping<B: Board>(state: &ModeState, board: &mut B) -> Mode {
    board.write_line(PING_REPLY);
    state.previous()
}

fn identify<B: Board>(state: &ModeState, board: &mut B) -> Mode {
    for line in IDENTIFY_REPLY {
        board.write_line(line);
    }
    state.previous()
}

fn help<B: Board>(state: &ModeState, board: &mut B) -> Mode {
    for line in HELP_TEXT {
        board.write_line(line);
    }
    board.write(b"\n");
    state.previous()
}

/// Stays in the stream. Prints one report block per fresh snapshot.
fn sensor_stream<B: Board>(board: &mut B) -> Mode {
    board.set_sampling(true);
    if let Some(snapshot) = board.take_snapshot() {
        write_report(board, &snapshot);
    }
    Mode::SensorStream
}

fn sensor_stop<B: Board>(board: &mut B) -> Mode {
    board.set_sampling(false);
    Mode::Idle
}

fn motor_single<B: Board>(state: &ModeState, board: &mut B, motor: MotorId) -> Mode {
    board.set_motor_speed(motor, state.parameter());
    state.previous()
}

fn motor_stop<B: Board>(state: &ModeState, board: &mut B) -> Mode {
    brake_all(board);
    state.previous()
}

fn motor_both<B: Board>(state: &ModeState, board: &mut B, speed: i32) -> Mode {
    board.set_motor_speed(MotorId::Left, speed);
    board.set_motor_speed(MotorId::Right, speed);
    state.previous()
}

fn motor_turn<B: Board>(state: &ModeState, board: &mut B, left: i32, right: i32) -> Mode {
    board.set_motor_speed(MotorId::Left, left);
    board.set_motor_speed(MotorId::Right, right);
    state.previous()
}

/// Brake both motors.
pub fn brake_all<B: Board>(board: &mut B) {
    board.set_motor_speed(MotorId::Left, BRAKE_SPEED);
    board.set_motor_speed(MotorId::Right, BRAKE_SPEED);
}

/// Twelve `<tag><4 digits>` lines.
pub fn write_report<B: Board>(board: &mut B, snapshot: &SensorSnapshot) {
    for (tag, value) in snapshot.report() {
        let mut line = [0u8; 5];
        line[0] = tag;
        line[1..].copy_from_slice(&fixed_width_digits(value));
        board.write_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Command, Event};

    #[derive(Default)]
    struct Recorder {
        out: Vec<u8>,
        motors: Vec<(MotorId, i32)>,
        sampling: bool,
        pending: Option<SensorSnapshot>,
    }

    impl Board for Recorder {
        fn write(&mut self, bytes: &[u8]) {
            self.out.extend_from_slice(bytes);
        }
        fn set_motor_speed(&mut self, motor: MotorId, speed: i32) {
            self.motors.push((motor, speed));
        }
        fn set_sampling(&mut self, enabled: bool) {
            self.sampling = enabled;
        }
        fn sampling_enabled(&self) -> bool {
            self.sampling
        }
        fn snapshot_pending(&self) -> bool {
            self.pending.is_some()
        }
        fn take_snapshot(&mut self) -> Option<SensorSnapshot> {
            self.pending.take()
        }
    }

    fn state_for(mode: Mode, parameter: Option<i32>, previous: Mode) -> ModeState {
        let mut s = ModeState::new();
        s.set_current(previous);
        s.apply(Event::Command(Command {
            mode,
            parameter,
        }));
        s
    }

    #[test]
    fn identify_prints_three_lines_and_returns_previous() {
        let mut board = Recorder::default();
        let s = state_for(Mode::Identify, None, Mode::SensorStream);
        assert_eq!(dispatch(&s, &mut board), Some(Mode::SensorStream));
        assert_eq!(board.out, b"rKrone\nt100\nsC007\n".to_vec());
    }

    #[test]
    fn help_prints_banner_and_returns_previous() {
        let mut board = Recorder::default();
        let s = state_for(Mode::Help, None, Mode::Idle);
        assert_eq!(dispatch(&s, &mut board), Some(Mode::Idle));
        let text = String::from_utf8(board.out).unwrap();
        assert!(text.contains("Krone"));
        assert!(text.contains(" ping "));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn backward_negates_parameter() {
        let mut board = Recorder::default();
        let s = state_for(Mode::MotorBackward, Some(5), Mode::Idle);
        assert_eq!(dispatch(&s, &mut board), Some(Mode::Idle));
        assert_eq!(board.motors, vec![(MotorId::Left, -5), (MotorId::Right, -5)]);
    }

    #[test]
    fn turns_hold_one_wheel() {
        let mut board = Recorder::default();
        dispatch(&state_for(Mode::MotorTurnLeft, Some(4), Mode::Idle), &mut board);
        dispatch(&state_for(Mode::MotorTurnRight, Some(6), Mode::Idle), &mut board);
        assert_eq!(
            board.motors,
            vec![
                (MotorId::Left, 4),
                (MotorId::Right, 0),
                (MotorId::Left, 0),
                (MotorId::Right, 6),
            ]
        );
    }

    #[test]
    fn single_motor_and_stop() {
        let mut board = Recorder::default();
        dispatch(&state_for(Mode::MotorRight, Some(3), Mode::Idle), &mut board);
        dispatch(&state_for(Mode::MotorStop, None, Mode::Idle), &mut board);
        assert_eq!(
            board.motors,
            vec![
                (MotorId::Right, 3),
                (MotorId::Left, BRAKE_SPEED),
                (MotorId::Right, BRAKE_SPEED),
            ]
        );
    }

    #[test]
    fn stream_reports_only_fresh_snapshots() {
        let mut board = Recorder::default();
        let s = state_for(Mode::SensorStream, None, Mode::Idle);

        assert_eq!(dispatch(&s, &mut board), Some(Mode::SensorStream));
        assert!(board.sampling);
        assert!(board.out.is_empty());

        board.pending = Some(SensorSnapshot {
            digital: [true, false, false, false],
            analog: [512, 0, 0, 1023],
            ..Default::default()
        });
        assert_eq!(dispatch(&s, &mut board), Some(Mode::SensorStream));
        let text = String::from_utf8(board.out.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "a0001");
        assert_eq!(lines[2], "c0512");
        assert_eq!(lines[7], "h1023");
        assert_eq!(lines[11], "l0000");
    }

    #[test]
    fn stop_disables_sampling_and_goes_idle() {
        let mut board = Recorder {
            sampling: true,
            ..Default::default()
        };
        let s = state_for(Mode::SensorStop, None, Mode::SensorStream);
        assert_eq!(dispatch(&s, &mut board), Some(Mode::Idle));
        assert!(!board.sampling);
    }

    #[test]
    fn reserved_modes_have_no_handler() {
        let mut board = Recorder::default();
        for mode in [Mode::Idle, Mode::ServoO, Mode::ServoR, Mode::Sound, Mode::SoundStop] {
            assert_eq!(dispatch(&state_for(mode, Some(1), Mode::Idle), &mut board), None);
        }
        assert!(board.out.is_empty());
        assert!(board.motors.is_empty());
    }
}
