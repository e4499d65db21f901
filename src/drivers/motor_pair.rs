// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Left/right drive motors of the differential base.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::drivers::h_bridge::HBridge;

/// Motor index as used by the protocol. Motor 0 is the left wheel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorId {
    Left = 0,
    Right = 1,
}

/// Anything that accepts a protocol speed value.
///
/// Failures are handled by the implementation; there is nobody to report them to.
pub trait SpeedControl {
    fn set_speed(&mut self, speed: i32);
}

impl<A, B, P, E> SpeedControl for HBridge<A, B, P>
where
    A: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
    P: SetDutyCycle,
{
    fn set_speed(&mut self, speed: i32) {
        if HBridge::set_speed(self, speed).is_err() {
            error!("h-bridge rejected speed {=i32}", speed);
        }
    }
}

pub struct MotorPair<L, R> {
    left: L,
    right: R,
}

impl<L: SpeedControl, R: SpeedControl> MotorPair<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    pub fn set_speed(&mut self, motor: MotorId, speed: i32) {
        trace!("motor {} speed {=i32}", motor, speed);
        match motor {
            MotorId::Left => self.left.set_speed(speed),
            MotorId::Right => self.right.set_speed(speed),
        }
    }
}
