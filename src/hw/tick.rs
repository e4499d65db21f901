// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sensor sampler tick on the TIM6 basic timer.

use stm32f7xx_hal::pac::{self, Interrupt, NVIC};

use crate::config::SAMPLE_RATE_HZ;
use crate::sensors::SampleTimer;

/// Counter clock after the prescaler.
const COUNTER_HZ: u32 = 10_000;

pub struct SampleTick {
    tim: pac::TIM6,
}

impl SampleTick {
    /// Configure TIM6 for [`SAMPLE_RATE_HZ`] update events. The timer stays stopped.
    ///
    /// `timclk_hz` is the APB1 timer clock.
    pub fn tim6(tim6: pac::TIM6, timclk_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim6en().set_bit());

        let tim = tim6;
        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.psc
            .write(|w| unsafe { w.bits(timclk_hz / COUNTER_HZ - 1) });
        tim.arr
            .write(|w| unsafe { w.bits(COUNTER_HZ / SAMPLE_RATE_HZ - 1) });
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        Self { tim }
    }

    /// Acknowledge the update event. Call from the TIM6 interrupt handler.
    #[inline]
    pub fn clear_interrupt() {
        let tim = unsafe { &*pac::TIM6::ptr() };
        tim.sr.modify(|_, w| w.uif().clear_bit());
    }
}

impl SampleTimer for SampleTick {
    fn start(&mut self) {
        self.tim.cnt.write(|w| unsafe { w.bits(0) });
        self.tim.sr.modify(|_, w| w.uif().clear_bit());
        self.tim.dier.modify(|_, w| w.uie().set_bit());
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
        unsafe { NVIC::unmask(Interrupt::TIM6_DAC) };
    }

    fn stop(&mut self) {
        NVIC::mask(Interrupt::TIM6_DAC);
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
        self.tim.dier.modify(|_, w| w.uie().clear_bit());
    }
}
