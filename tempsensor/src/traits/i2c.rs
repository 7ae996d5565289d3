use core::fmt::{Formatter, LowerHex, UpperHex};

/// A 7-bit I2C device address.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cAddress(u8);

impl I2cAddress {
    pub const fn new(val: u8) -> Self {
        Self(val & 0x7F)
    }

    /// Address from the 8-bit (write) form used in datasheets, e.g. `0x90`.
    pub const fn from_8bit(val: u8) -> Self {
        Self(val >> 1)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl From<I2cAddress> for u8 {
    fn from(address: I2cAddress) -> Self {
        address.0
    }
}

impl From<u8> for I2cAddress {
    fn from(val: u8) -> Self {
        I2cAddress::new(val)
    }
}

impl LowerHex for I2cAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        LowerHex::fmt(&self.0, f)
    }
}

impl UpperHex for I2cAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        UpperHex::fmt(&self.0, f)
    }
}
