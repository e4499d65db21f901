// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Basic ADC support for STM32F7 using direct PAC register access.
//!
//! Thin wrapper around ADC1 with blocking single-channel reads. Each sample handed to the sensor
//! sampler is the mean of [`ADC_AVERAGE`] raw conversions.
//!
//! Example:
//! ```ignore
//! let mut adc1 = Adc::adc1(dp.ADC1);
//! let value = adc1.read_channel(3);
//! ```

use stm32f7xx_hal::pac;

use crate::config::ADC_AVERAGE;
use crate::sensors::AdcRead;

/// ADC wrapper over a PAC ADCx peripheral.
pub struct Adc<ADC> {
    adc: ADC,
}

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());
}

fn init_basic_adc(adc: &pac::adc1::RegisterBlock) {
    // Power off to configure
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 12-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b00));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    // Long sample time on every channel the sampler uses
    adc.smpr2.modify(|_, w| {
        w.smp0().bits(0b111);
        w.smp1().bits(0b111);
        w.smp2().bits(0b111);
        w.smp3().bits(0b111);
        w.smp4().bits(0b111);
        w.smp5().bits(0b111);
        w
    });

    // Sequence length = 1 conversion
    adc.sqr1.modify(|_, w| w.l().bits(0));

    // Power on
    adc.cr2.modify(|_, w| w.adon().set_bit());
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();
        init_basic_adc(&adc1);

        Self { adc: adc1 }
    }

    /// Read a single raw conversion.
    pub fn read_raw(&self, channel: u8) -> u16 {
        let adc = &self.adc;

        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        // Start
        adc.cr2.modify(|_, w| w.swstart().set_bit());

        // Wait for completion
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits() as u16
    }

    /// Mean of `ADC_AVERAGE` raw conversions.
    pub fn read_averaged(&self, channel: u8) -> u16 {
        let sum: u32 = (0..ADC_AVERAGE)
            .map(|_| u32::from(self.read_raw(channel)))
            .sum();
        (sum / ADC_AVERAGE) as u16
    }
}

impl AdcRead for Adc<pac::ADC1> {
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.read_averaged(ch)
    }
}
