// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! GPIO glue between the HAL pin types and the `embedded-hal` traits used by the drivers.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::{
    gpio::{self, Output, PushPull},
    pac,
};

use crate::sensors::DigitalInputs;

/// Push-pull output, generic over any GPIO pin.
pub struct DirPin<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> DirPin<P, N> {
    /// Take a pin and drive it low.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_low();
        Self { pin }
    }
}

impl<const P: char, const N: u8> ErrorType for DirPin<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for DirPin<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}

/// The four digital sensor inputs on PB4..PB7, read in one port access.
pub struct PortBInputs {
    _pins: crate::hw::pins::SensorInputPins,
}

impl PortBInputs {
    pub fn new(pins: crate::hw::pins::SensorInputPins) -> Self {
        Self { _pins: pins }
    }
}

impl DigitalInputs for PortBInputs {
    fn read_inputs(&mut self) -> [bool; 4] {
        let idr = unsafe { (*pac::GPIOB::ptr()).idr.read().bits() };
        [
            idr & (1 << 4) != 0,
            idr & (1 << 5) != 0,
            idr & (1 << 6) != 0,
            idr & (1 << 7) != 0,
        ]
    }
}
