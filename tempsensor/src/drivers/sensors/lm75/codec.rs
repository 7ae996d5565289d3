//! Fixed-point temperature encoding of the LM75 family registers.
//!
//! Temperature and threshold registers are 16 bits wide and hold a
//! two's-complement count of `lsb` degrees Celsius. Only the `bits` most
//! (left alignment) or least (right alignment) significant bits carry data;
//! the rest are ignored on read and written as zero.

use crate::domain::temperature::{Celsius, Temperature};

/// Position of the data field inside the 16-bit register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alignment {
    /// Data occupies the most significant bits, unused bits at the bottom.
    Left,
    /// Data occupies the least significant bits, sign-extended above.
    Right,
}

/// Fixed-point layout of one temperature field.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Format {
    bits: u8,
    alignment: Alignment,
    lsb: f32,
}

impl Format {
    /// 9-bit field, 0.5 °C steps.
    pub const NINE_BIT: Format = Format::new(9, Alignment::Left, 0.5);
    /// 11-bit field, 0.125 °C steps.
    pub const ELEVEN_BIT: Format = Format::new(11, Alignment::Left, 0.125);
    /// 12-bit field, 0.0625 °C steps.
    pub const TWELVE_BIT: Format = Format::new(12, Alignment::Left, 0.0625);

    /// Field of `bits` significant bits, each count worth `lsb` °C.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is not in `1..=16`. In a `const` item this is a
    /// compile error instead.
    pub const fn new(bits: u8, alignment: Alignment, lsb: f32) -> Self {
        assert!(bits >= 1 && bits <= 16, "field width must be 1..=16 bits");
        Self {
            bits,
            alignment,
            lsb,
        }
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Temperature represented by one count.
    pub fn lsb(&self) -> f32 {
        self.lsb
    }

    /// Lowest representable temperature.
    pub fn min(&self) -> Temperature<Celsius> {
        Temperature::new(self.min_count() as f32 * self.lsb)
    }

    /// Highest representable temperature.
    pub fn max(&self) -> Temperature<Celsius> {
        Temperature::new(self.max_count() as f32 * self.lsb)
    }

    fn shift(&self) -> u32 {
        16 - self.bits as u32
    }

    fn min_count(&self) -> i32 {
        -(1i32 << (self.bits - 1))
    }

    fn max_count(&self) -> i32 {
        (1i32 << (self.bits - 1)) - 1
    }

    fn field_mask(&self) -> u16 {
        (u16::MAX >> self.shift()) << self.alignment_shift()
    }

    fn alignment_shift(&self) -> u32 {
        match self.alignment {
            Alignment::Left => self.shift(),
            Alignment::Right => 0,
        }
    }

    /// Sign-extended count held by `raw`.
    pub fn count(&self, raw: u16) -> i16 {
        let shift = self.shift();
        match self.alignment {
            Alignment::Left => (raw as i16) >> shift,
            Alignment::Right => ((raw << shift) as i16) >> shift,
        }
    }
}

/// Decode a raw register value.
pub fn decode(raw: u16, format: &Format) -> Temperature<Celsius> {
    Temperature::new(format.count(raw) as f32 * format.lsb)
}

/// Encode a temperature into a raw register value.
///
/// The fraction below one LSB is truncated toward zero, so `75.3` becomes
/// `75.0` and `-55.7` becomes `-55.5` with a 0.5 °C field. Values beyond the
/// field range saturate at its limits and NaN encodes as zero. Unused bits
/// are zero.
pub fn encode(temperature: Temperature<Celsius>, format: &Format) -> u16 {
    let count = (temperature.raw_value() / format.lsb) as i32;
    let count = count.clamp(format.min_count(), format.max_count());
    ((count as u16) << format.alignment_shift()) & format.field_mask()
}
