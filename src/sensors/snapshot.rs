// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Latest set of sensor readings and its wire report.

/// One complete sampler tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    pub digital: [bool; 4],
    pub analog: [u16; 4],
    pub battery_cpu: u16,
    pub battery_motor: u16,
    /// Reserved, always zero.
    pub extra: [u16; 2],
}

impl SensorSnapshot {
    /// Report lines in wire order, each as its tag letter and value.
    pub fn report(&self) -> [(u8, u16); 12] {
        [
            (b'a', u16::from(self.digital[0])),
            (b'b', u16::from(self.digital[1])),
            (b'c', self.analog[0]),
            (b'd', self.analog[1]),
            (b'e', u16::from(self.digital[2])),
            (b'f', u16::from(self.digital[3])),
            (b'g', self.analog[2]),
            (b'h', self.analog[3]),
            (b'i', self.battery_cpu),
            (b'j', self.battery_motor),
            (b'k', self.extra[0]),
            (b'l', self.extra[1]),
        ]
    }
}

/// Render `value` as exactly four decimal digits, zero padded.
///
/// Values above 9999 keep their lowest four digits.
pub fn fixed_width_digits(value: u16) -> [u8; 4] {
    let mut n = value;
    let mut buf = [b'0'; 4];
    for slot in buf.iter_mut().rev() {
        *slot = b'0' + (n % 10) as u8;
        n /= 10;
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_order_interleaves_digital_and_analog() {
        let s = SensorSnapshot {
            digital: [true, false, false, true],
            analog: [10, 20, 30, 40],
            battery_cpu: 900,
            battery_motor: 850,
            extra: [0, 0],
        };
        let tags: Vec<u8> = s.report().iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, b"abcdefghijkl".to_vec());

        let values: Vec<u16> = s.report().iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 0, 10, 20, 0, 1, 30, 40, 900, 850, 0, 0]);
    }

    #[test]
    fn fixed_width_pads_and_truncates() {
        assert_eq!(&fixed_width_digits(0), b"0000");
        assert_eq!(&fixed_width_digits(7), b"0007");
        assert_eq!(&fixed_width_digits(1023), b"1023");
        assert_eq!(&fixed_width_digits(4095), b"4095");
        assert_eq!(&fixed_width_digits(12345), b"2345");
    }
}
