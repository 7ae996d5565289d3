//! Descriptors of the supported devices.
//!
//! All devices of the family share the LM75 register layout: a pointer
//! register selects one of the Temp, Conf, low (Thyst/T_LOW) and high
//! (Tos/T_HIGH) registers, optionally followed by device specific ones. What
//! differs is captured here as plain data, so the driver needs no per-device
//! code paths.

use super::codec::Format;
use crate::traits::i2c::I2cAddress;

/// Register pointer values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterMap {
    pub temp: u8,
    pub conf: u8,
    /// Hysteresis (Thyst) or low (T_LOW) threshold.
    pub low: u8,
    /// Overtemperature shutdown (Tos) or high (T_HIGH) threshold.
    pub high: u8,
    /// Sample period register (Tidle), if present.
    pub idle: Option<u8>,
}

impl RegisterMap {
    pub const LM75: RegisterMap = RegisterMap {
        temp: 0x00,
        conf: 0x01,
        low: 0x02,
        high: 0x03,
        idle: None,
    };
}

/// Width of a register on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Width {
    U8,
    U16,
}

/// Layout of the configuration register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfLayout {
    pub width: Width,
    /// OS comparator/interrupt selection bit.
    pub os_mode: u16,
}

/// Alert flags latched in the configuration register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertLayout {
    /// Temperature went above the high threshold (FH).
    pub high: u16,
    /// Temperature went below the low threshold (FL).
    pub low: u16,
}

/// Optional operations a device may support.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    AlertClear,
    IdleTime,
}

/// Everything the driver needs to know about one device type.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Variant {
    pub name: &'static str,
    pub default_address: I2cAddress,
    pub registers: RegisterMap,
    /// Format of the Temp register.
    pub temperature: Format,
    /// Format of the low and high threshold registers.
    pub threshold: Format,
    pub conf: ConfLayout,
    pub alert: Option<AlertLayout>,
}

impl Variant {
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::AlertClear => self.alert.is_some(),
            Capability::IdleTime => self.registers.idle.is_some(),
        }
    }
}

const OS_COMP_INT: u16 = 0x02;

/// NXP LM75B: 11-bit temperature, 9-bit thresholds.
///
/// The Temp register is read at its full 0.125 °C resolution, finer than the
/// 0.5 °C steps of Tos and Thyst: `0x4BA0` reads as 75.625 °C.
pub const LM75B: Variant = Variant {
    name: "LM75B",
    default_address: I2cAddress::from_8bit(0x90),
    registers: RegisterMap::LM75,
    temperature: Format::ELEVEN_BIT,
    threshold: Format::NINE_BIT,
    conf: ConfLayout {
        width: Width::U8,
        os_mode: OS_COMP_INT,
    },
    alert: None,
};

/// NXP PCT2075: LM75B with a programmable sample period (Tidle).
pub const PCT2075: Variant = Variant {
    name: "PCT2075",
    registers: RegisterMap {
        idle: Some(0x04),
        ..RegisterMap::LM75
    },
    ..LM75B
};

/// NXP P3T1755: 12-bit temperature and thresholds (T_LOW/T_HIGH).
pub const P3T1755: Variant = Variant {
    name: "P3T1755",
    default_address: I2cAddress::from_8bit(0x98),
    registers: RegisterMap::LM75,
    temperature: Format::TWELVE_BIT,
    threshold: Format::TWELVE_BIT,
    conf: ConfLayout {
        width: Width::U8,
        os_mode: OS_COMP_INT,
    },
    alert: None,
};

/// NXP P3T1085: P3T1755 register set with a 16-bit configuration register
/// carrying latched FH/FL alert flags, cleared by reading it.
pub const P3T1085: Variant = Variant {
    name: "P3T1085",
    conf: ConfLayout {
        width: Width::U16,
        os_mode: 0x0400,
    },
    alert: Some(AlertLayout {
        high: 0x1000,
        low: 0x0800,
    }),
    ..P3T1755
};
