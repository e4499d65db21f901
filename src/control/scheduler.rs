// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cooperative mode scheduler.
//!
//! The main loop calls [`Scheduler::step`] forever. Each step takes at most one command from the
//! mailbox filled by the receive interrupt, then either sleeps or runs the handler for the current
//! mode with interrupts masked.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! loop {
//!     scheduler.step(&mut mailbox, &mut cpu, &mut board);
//! }
//! ```

use heapless::spsc::Consumer;

use crate::control::modes::{self, Board};
use crate::control::ModeState;
use crate::protocol::{Event, Mode};

/// Processor services the scheduler needs.
pub trait Cpu {
    /// Run `f` with interrupts masked.
    fn masked<R>(&mut self, f: impl FnOnce() -> R) -> R;

    /// Sleep until the next interrupt, unless `pending` reports work already waiting.
    ///
    /// `pending` must be evaluated with interrupts masked so that an interrupt arriving between
    /// the check and the sleep still wakes the processor.
    fn sleep_unless(&mut self, pending: impl FnOnce() -> bool);
}

/// What one scheduler step did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do, the processor slept.
    Slept,
    /// A handler ran and returned this mode.
    Ran(Mode),
    /// The mode had no handler and was reset to idle.
    Dropped(Mode),
}

pub struct Scheduler {
    state: ModeState,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            state: ModeState::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &ModeState {
        &self.state
    }

    /// Returns `true` if the current mode has nothing to do until the next interrupt.
    fn is_waiting<B: Board>(&self, board: &B) -> bool {
        match self.state.current() {
            Mode::Idle => true,
            // Paced by the sampler: one report per tick.
            Mode::SensorStream => board.sampling_enabled() && !board.snapshot_pending(),
            _ => false,
        }
    }

    /// Run one iteration of the main loop.
    pub fn step<C, B, const N: usize>(
        &mut self,
        mailbox: &mut Consumer<'_, Event, N>,
        cpu: &mut C,
        board: &mut B,
    ) -> Step
    where
        C: Cpu,
        B: Board,
    {
        if let Some(event) = mailbox.dequeue() {
            self.state.apply(event);
        }

        if self.is_waiting(board) {
            let streaming = self.state.current() == Mode::SensorStream;
            cpu.sleep_unless(|| mailbox.ready() || (streaming && board.snapshot_pending()));
            return Step::Slept;
        }

        let state = &mut self.state;
        let ran = cpu.masked(|| {
            let next = modes::dispatch(state, board);
            if let Some(mode) = next {
                state.set_current(mode);
            }
            next
        });

        match ran {
            Some(mode) => Step::Ran(mode),
            None => {
                let mode = self.state.current();
                warn!("no handler for {}, back to idle", mode);
                self.state.set_current(Mode::Idle);
                Step::Dropped(mode)
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::MotorId;
    use crate::protocol::Command;
    use crate::sensors::SensorSnapshot;
    use heapless::spsc::Queue;

    #[derive(Default)]
    struct FakeCpu {
        sleeps: u32,
        masked: u32,
    }

    impl Cpu for FakeCpu {
        fn masked<R>(&mut self, f: impl FnOnce() -> R) -> R {
            self.masked += 1;
            f()
        }

        fn sleep_unless(&mut self, pending: impl FnOnce() -> bool) {
            if !pending() {
                self.sleeps += 1;
            }
        }
    }

    #[derive(Default)]
    struct Quiet {
        out: Vec<u8>,
        motors: Vec<(MotorId, i32)>,
        sampling: bool,
        pending: Option<SensorSnapshot>,
    }

    impl Board for Quiet {
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

    #[test]
    fn idle_sleeps_without_masking() {
        let mut queue: Queue<Event, 4> = Queue::new();
        let (_tx, mut rx) = queue.split();
        let mut cpu = FakeCpu::default();
        let mut board = Quiet::default();
        let mut sched = Scheduler::new();

        assert_eq!(sched.step(&mut rx, &mut cpu, &mut board), Step::Slept);
        assert_eq!(cpu.sleeps, 1);
        assert_eq!(cpu.masked, 0);
    }

    #[test]
    fn ping_runs_once_masked_then_returns_to_idle() {
        let mut queue: Queue<Event, 4> = Queue::new();
        let (mut tx, mut rx) = queue.split();
        let mut cpu = FakeCpu::default();
        let mut board = Quiet::default();
        let mut sched = Scheduler::new();

        tx.enqueue(Event::Command(Command::new(Mode::Ping))).unwrap();
        assert_eq!(sched.step(&mut rx, &mut cpu, &mut board), Step::Ran(Mode::Idle));
        assert_eq!(cpu.masked, 1);
        assert_eq!(board.out, b"pong\n".to_vec());

        assert_eq!(sched.step(&mut rx, &mut cpu, &mut board), Step::Slept);
        assert_eq!(board.out, b"pong\n".to_vec());
    }

    #[test]
    fn reserved_mode_is_forced_idle() {
        let mut queue: Queue<Event, 4> = Queue::new();
        let (mut tx, mut rx) = queue.split();
        let mut cpu = FakeCpu::default();
        let mut board = Quiet::default();
        let mut sched = Scheduler::new();

        tx.enqueue(Event::Command(Command::with_parameter(Mode::ServoP, 90)))
            .unwrap();
        assert_eq!(
            sched.step(&mut rx, &mut cpu, &mut board),
            Step::Dropped(Mode::ServoP)
        );
        assert_eq!(sched.state().current(), Mode::Idle);
        assert!(board.out.is_empty());
    }

    #[test]
    fn queued_commands_run_in_order() {
        let mut queue: Queue<Event, 4> = Queue::new();
        let (mut tx, mut rx) = queue.split();
        let mut cpu = FakeCpu::default();
        let mut board = Quiet::default();
        let mut sched = Scheduler::new();

        tx.enqueue(Event::Command(Command::new(Mode::MotorStop))).unwrap();
        tx.enqueue(Event::Command(Command::with_parameter(Mode::MotorForward, 3)))
            .unwrap();

        sched.step(&mut rx, &mut cpu, &mut board);
        sched.step(&mut rx, &mut cpu, &mut board);
        assert_eq!(
            board.motors,
            vec![
                (MotorId::Left, 11),
                (MotorId::Right, 11),
                (MotorId::Left, 3),
                (MotorId::Right, 3),
            ]
        );
        assert_eq!(sched.state().current(), Mode::Idle);
    }

    #[test]
    fn stream_sleeps_between_ticks() {
        let mut queue: Queue<Event, 4> = Queue::new();
        let (mut tx, mut rx) = queue.split();
        let mut cpu = FakeCpu::default();
        let mut board = Quiet::default();
        let mut sched = Scheduler::new();

        tx.enqueue(Event::Command(Command::new(Mode::SensorStream)))
            .unwrap();
        // Entry turns the sampler on.
        assert_eq!(
            sched.step(&mut rx, &mut cpu, &mut board),
            Step::Ran(Mode::SensorStream)
        );
        assert!(board.sampling);

        // No tick yet.
        assert_eq!(sched.step(&mut rx, &mut cpu, &mut board), Step::Slept);
        assert!(board.out.is_empty());

        board.pending = Some(SensorSnapshot::default());
        assert_eq!(
            sched.step(&mut rx, &mut cpu, &mut board),
            Step::Ran(Mode::SensorStream)
        );
        assert_eq!(board.out.iter().filter(|&&b| b == b'\n').count(), 12);
    }
}
