// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! L293D-style H-bridge channel: two direction inputs and a PWM enable line.
//!
//! Truth table of the bridge:
//!
//! | EN  | IN_A | IN_B | Action     |
//! | --- | ---- | ---- | ---------- |
//! | 1   | 1    | 0    | Forward    |
//! | 1   | 0    | 1    | Reverse    |
//! | 1   | 1    | 1    | Fast stop  |
//! | 0   | x    | x    | Slow stop  |
//!
//! Speeds follow the protocol scale: `0..=10` drives forward at `speed / 10` of full duty,
//! [`BRAKE_SPEED`] shorts the motor, anything else drives in reverse.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::{BRAKE_SPEED, SPEED_STEPS};

/// Logical drive state of one bridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    Forward,
    Reverse,
    Brake,
}

impl Drive {
    /// Direction pin states `(IN_A, IN_B)` for this drive.
    #[inline]
    pub fn pins(self) -> (bool, bool) {
        match self {
            Drive::Forward => (true, false),
            Drive::Reverse => (false, true),
            Drive::Brake => (true, true),
        }
    }
}

/// Drive state selected by a speed value.
pub fn drive_for(speed: i32) -> Drive {
    if speed == BRAKE_SPEED {
        Drive::Brake
    } else if (0..=SPEED_STEPS).contains(&speed) {
        Drive::Forward
    } else {
        Drive::Reverse
    }
}

/// Compare register value for a speed.
///
/// The raw signed speed is scaled and truncated to the 16-bit register, so negative speeds wrap
/// to large values and the brake value lands above full duty. Both saturate the output on a
/// counter whose top is `max_duty`.
pub fn duty_register(speed: i32, max_duty: u16) -> u16 {
    (speed.wrapping_mul(i32::from(max_duty)) / SPEED_STEPS) as u16
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error<PinE, PwmE> {
    /// A direction pin could not be driven.
    Pin(PinE),
    /// The PWM channel rejected the duty value.
    Pwm(PwmE),
}

pub struct HBridge<A, B, P> {
    in_a: A,
    in_b: B,
    enable: P,
}

impl<A, B, P, E> HBridge<A, B, P>
where
    A: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
    P: SetDutyCycle,
{
    pub fn new(in_a: A, in_b: B, enable: P) -> Self {
        Self {
            in_a,
            in_b,
            enable,
        }
    }

    /// Apply a protocol speed value. The duty is written before the direction pins.
    pub fn set_speed(&mut self, speed: i32) -> Result<Drive, Error<E, P::Error>> {
        let duty = duty_register(speed, self.enable.max_duty_cycle());
        self.enable.set_duty_cycle(duty).map_err(Error::Pwm)?;

        let drive = drive_for(speed);
        let (a, b) = drive.pins();
        if a {
            self.in_a.set_high().map_err(Error::Pin)?;
        }
        if b {
            self.in_b.set_high().map_err(Error::Pin)?;
        }
        if !a {
            self.in_a.set_low().map_err(Error::Pin)?;
        }
        if !b {
            self.in_b.set_low().map_err(Error::Pin)?;
        }
        Ok(drive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{MockPin, MockPwm};

    #[test]
    fn drive_selection() {
        assert_eq!(drive_for(0), Drive::Forward);
        assert_eq!(drive_for(10), Drive::Forward);
        assert_eq!(drive_for(11), Drive::Brake);
        assert_eq!(drive_for(12), Drive::Reverse);
        assert_eq!(drive_for(-1), Drive::Reverse);
        assert_eq!(drive_for(9999), Drive::Reverse);
    }

    #[test]
    fn duty_scaling() {
        assert_eq!(duty_register(0, 255), 0);
        assert_eq!(duty_register(5, 255), 127);
        assert_eq!(duty_register(10, 255), 255);
        assert_eq!(duty_register(11, 255), 280);
    }

    #[test]
    fn negative_speed_wraps_in_the_register() {
        // -5 * 255 / 10 truncates toward zero to -127.
        assert_eq!(duty_register(-5, 255), (-127i16) as u16);
        assert_eq!(duty_register(-5, 255), 0xFF81);
        assert_eq!(duty_register(-10, 255), 0xFF01);
    }

    #[test]
    fn forward_reverse_and_brake_pins() {
        let mut bridge = HBridge::new(MockPin::default(), MockPin::default(), MockPwm::new(255));

        assert_eq!(bridge.set_speed(5), Ok(Drive::Forward));
        {
            let (a, b, p) = (&bridge.in_a, &bridge.in_b, &bridge.enable);
            assert!(a.is_high() && !b.is_high());
            assert_eq!(p.duty(), 127);
        }

        assert_eq!(bridge.set_speed(-5), Ok(Drive::Reverse));
        assert!(!bridge.in_a.is_high() && bridge.in_b.is_high());
        assert_eq!(bridge.enable.duty(), 0xFF81);

        assert_eq!(bridge.set_speed(BRAKE_SPEED), Ok(Drive::Brake));
        assert!(bridge.in_a.is_high() && bridge.in_b.is_high());
    }
}
