// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic sensor sampler.
//!
//! Runs from the sampler timer interrupt. Each tick reads every analog channel and the digital
//! inputs and replaces the whole snapshot. No filtering happens here; the ADC layer hands back
//! samples that are already averaged.

use crate::config::{ANALOG_CHANNELS, BATTERY_CPU_CHANNEL, BATTERY_MOTOR_CHANNEL};
use crate::sensors::SensorSnapshot;

/// Trait for reading a single channel from an ADC peripheral.
pub trait AdcRead {
    fn read_channel(&mut self, ch: u8) -> u16;
}

/// The four digital sensor inputs, read together.
pub trait DigitalInputs {
    fn read_inputs(&mut self) -> [bool; 4];
}

/// Start/stop control over the timer that paces the sampler.
pub trait SampleTimer {
    fn start(&mut self);
    fn stop(&mut self);
}

pub struct Sampler<ADC, DIN> {
    adc: ADC,
    inputs: DIN,
}

impl<ADC, DIN> Sampler<ADC, DIN>
where
    ADC: AdcRead,
    DIN: DigitalInputs,
{
    pub fn new(adc: ADC, inputs: DIN) -> Self {
        Self { adc, inputs }
    }

    /// Take one complete set of readings.
    pub fn sample(&mut self) -> SensorSnapshot {
        let mut analog = [0u16; 4];
        for (slot, &ch) in analog.iter_mut().zip(ANALOG_CHANNELS.iter()) {
            *slot = self.adc.read_channel(ch);
        }

        SensorSnapshot {
            digital: self.inputs.read_inputs(),
            analog,
            battery_cpu: self.adc.read_channel(BATTERY_CPU_CHANNEL),
            battery_motor: self.adc.read_channel(BATTERY_MOTOR_CHANNEL),
            extra: [0, 0],
        }
    }
}

/// Idempotent on/off switch over a [`SampleTimer`].
pub struct SamplingSwitch<T> {
    timer: T,
    enabled: bool,
}

impl<T: SampleTimer> SamplingSwitch<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            enabled: false,
        }
    }

    /// Start sampling. Does nothing if already running.
    pub fn enable(&mut self) {
        if !self.enabled {
            self.timer.start();
            self.enabled = true;
            info!("sampling on");
        }
    }

    /// Stop sampling. Does nothing if already stopped.
    pub fn disable(&mut self) {
        if self.enabled {
            self.timer.stop();
            self.enabled = false;
            info!("sampling off");
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAdc;

    impl AdcRead for FakeAdc {
        fn read_channel(&mut self, ch: u8) -> u16 {
            100 + u16::from(ch)
        }
    }

    struct FakeInputs([bool; 4]);

    impl DigitalInputs for FakeInputs {
        fn read_inputs(&mut self) -> [bool; 4] {
            self.0
        }
    }

    #[derive(Default)]
    struct CountingTimer {
        starts: u32,
        stops: u32,
    }

    impl SampleTimer for &mut CountingTimer {
        fn start(&mut self) {
            self.starts += 1;
        }
        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[test]
    fn sample_fills_every_field() {
        let mut sampler = Sampler::new(FakeAdc, FakeInputs([true, false, true, false]));
        let s = sampler.sample();
        assert_eq!(s.digital, [true, false, true, false]);
        assert_eq!(s.analog, [100, 101, 102, 103]);
        assert_eq!(s.battery_cpu, 104);
        assert_eq!(s.battery_motor, 105);
        assert_eq!(s.extra, [0, 0]);
    }

    #[test]
    fn switch_is_idempotent() {
        let mut timer = CountingTimer::default();
        {
            let mut switch = SamplingSwitch::new(&mut timer);
            switch.disable();
            switch.enable();
            switch.enable();
            assert!(switch.is_enabled());
            switch.disable();
            switch.disable();
            assert!(!switch.is_enabled());
        }
        assert_eq!(timer.starts, 1);
        assert_eq!(timer.stops, 1);
    }
}
