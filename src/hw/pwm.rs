// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PWM enable lines for the H-bridges on TIM4 CH1/CH2.
//!
//! This module configures TIM4 registers for edge-aligned PWM mode 1 with a counter top of
//! [`PWM_MAX_DUTY`]. Compare values are written unclamped: anything above the top keeps the output
//! permanently active.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use stm32f7xx_hal::pac;

use crate::config::{PWM_FREQUENCY_HZ, PWM_MAX_DUTY};

/// OC1M = OC2M = PWM mode 1, preload enabled on both channels.
const CCMR1_PWM1_CH1_CH2: u32 = (0b110 << 4) | (1 << 3) | (0b110 << 12) | (1 << 11);

/// One TIM4 output channel. `C` is 1 or 2.
pub struct Pwm4Channel<const C: u8> {
    _private: (),
}

/// Configure TIM4 and hand out its first two channels.
///
/// `timclk_hz` is the APB1 timer clock.
pub fn tim4(_tim4: pac::TIM4, timclk_hz: u32) -> (Pwm4Channel<1>, Pwm4Channel<2>) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

    let tim = unsafe { &*pac::TIM4::ptr() };

    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    let ticks = PWM_FREQUENCY_HZ * (u32::from(PWM_MAX_DUTY) + 1);
    let psc = (timclk_hz / ticks).saturating_sub(1);
    tim.psc.write(|w| unsafe { w.bits(psc) });
    tim.arr.write(|w| unsafe { w.bits(u32::from(PWM_MAX_DUTY)) });

    tim.ccmr1_output()
        .write(|w| unsafe { w.bits(CCMR1_PWM1_CH1_CH2) });
    tim.ccr1.write(|w| unsafe { w.bits(0) });
    tim.ccr2.write(|w| unsafe { w.bits(0) });

    // Output enable, active high
    tim.ccer.modify(|_, w| {
        w.cc1p()
            .clear_bit()
            .cc2p()
            .clear_bit()
            .cc1e()
            .set_bit()
            .cc2e()
            .set_bit()
    });

    // Latch prescaler and preload registers, then start
    tim.egr.write(|w| w.ug().set_bit());
    tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

    (Pwm4Channel { _private: () }, Pwm4Channel { _private: () })
}

impl<const C: u8> ErrorType for Pwm4Channel<C> {
    type Error = Infallible;
}

impl<const C: u8> SetDutyCycle for Pwm4Channel<C> {
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        PWM_MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let tim = unsafe { &*pac::TIM4::ptr() };
        match C {
            1 => tim.ccr1.write(|w| unsafe { w.bits(u32::from(duty)) }),
            _ => tim.ccr2.write(|w| unsafe { w.bits(u32::from(duty)) }),
        }
        Ok(())
    }
}
