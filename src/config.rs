// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time board configuration.

/// Serial link baud rate expected by the remote-control application.
pub const BAUD_RATE: u32 = 9_600;

/// Slots in the receive ring buffer. One slot is kept free to tell full from empty.
pub const RX_QUEUE_CAPACITY: usize = 8;

/// Slots in the command mailbox between the receive interrupt and the main loop.
pub const COMMAND_MAILBOX_DEPTH: usize = 4;

/// Most decimal digits accepted for a command parameter.
pub const MAX_PARAMETER_DIGITS: u8 = 4;

/// Speed steps between stopped and full duty.
pub const SPEED_STEPS: i32 = 10;

/// Speed value that requests an active brake.
pub const BRAKE_SPEED: i32 = 11;

/// PWM counter top. Duty registers are 8 bit wide in effect.
pub const PWM_MAX_DUTY: u16 = 255;

/// PWM carrier frequency for both H-bridge enable lines.
pub const PWM_FREQUENCY_HZ: u32 = 1_000;

/// Sensor sampler tick rate.
pub const SAMPLE_RATE_HZ: u32 = 100;

/// Raw conversions averaged into one analog sample.
pub const ADC_AVERAGE: u32 = 4;

/// Analog channels for the four general-purpose inputs.
pub const ANALOG_CHANNELS: [u8; 4] = [0, 1, 2, 3];

/// Analog channel monitoring the logic battery.
pub const BATTERY_CPU_CHANNEL: u8 = 4;

/// Analog channel monitoring the motor battery.
pub const BATTERY_MOTOR_CHANNEL: u8 = 5;
