// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for STM32F777 MCU for Krone.

use stm32f7xx_hal::{
    gpio::{self, gpioa, gpiob, Alternate, Analog, Input, Output, PullDown, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub left: MotorPins<0, 1, 12>,
    pub right: MotorPins<2, 3, 13>,
    pub analog: AnalogPins,
    pub inputs: SensorInputPins,
}

/// USART1 TX/RX, command link
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// H-bridge channel pins: two direction inputs and a TIM4 PWM enable on port D.
pub struct MotorPins<const A: u8, const B: u8, const EN: u8> {
    pub in_a: gpio::Pin<'D', A, Output<PushPull>>,
    pub in_b: gpio::Pin<'D', B, Output<PushPull>>,
    pub enable: gpio::Pin<'D', EN, Alternate<2>>,
}

/// ADC1_IN0..IN5: four general-purpose inputs and the two battery monitors
pub struct AnalogPins {
    pub ain0: gpioa::PA0<Analog>,
    pub ain1: gpioa::PA1<Analog>,
    pub ain2: gpioa::PA2<Analog>,
    pub ain3: gpioa::PA3<Analog>,
    pub battery_cpu: gpioa::PA4<Analog>,
    pub battery_motor: gpioa::PA5<Analog>,
}

/// Digital sensor inputs PB4..PB7
pub struct SensorInputPins {
    pub din0: gpiob::PB4<Input<PullDown>>,
    pub din1: gpiob::PB5<Input<PullDown>>,
    pub din2: gpiob::PB6<Input<PullDown>>,
    pub din3: gpiob::PB7<Input<PullDown>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            left: MotorPins {
                in_a: gpiod.pd0.into_push_pull_output(),
                in_b: gpiod.pd1.into_push_pull_output(),
                enable: gpiod.pd12.into_alternate::<2>(), // TIM4_CH1
            },

            right: MotorPins {
                in_a: gpiod.pd2.into_push_pull_output(),
                in_b: gpiod.pd3.into_push_pull_output(),
                enable: gpiod.pd13.into_alternate::<2>(), // TIM4_CH2
            },

            analog: AnalogPins {
                ain0: gpioa.pa0.into_analog(),
                ain1: gpioa.pa1.into_analog(),
                ain2: gpioa.pa2.into_analog(),
                ain3: gpioa.pa3.into_analog(),
                battery_cpu: gpioa.pa4.into_analog(),
                battery_motor: gpioa.pa5.into_analog(),
            },

            inputs: SensorInputPins {
                din0: gpiob.pb4.into_pull_down_input(),
                din1: gpiob.pb5.into_pull_down_input(),
                din2: gpiob.pb6.into_pull_down_input(),
                din3: gpiob.pb7.into_pull_down_input(),
            },
        }
    }
}
