use super::super::variant::{AlertLayout, ConfLayout, Width};
use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::I2c;

/// Behaviour of the OS (overtemperature shutdown) output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OsMode {
    /// OS is asserted while the temperature is above Tos, released below Thyst.
    Comparator,
    /// OS is asserted when a threshold is crossed and held until cleared.
    Interrupt,
}

/// Contents of the configuration register.
///
/// 8-bit registers occupy the low byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Conf {
    bits: u16,
    layout: ConfLayout,
}

impl Conf {
    pub fn new(bits: u16, layout: ConfLayout) -> Self {
        Self { bits, layout }
    }

    pub fn read<I: I2c>(
        address: I2cAddress,
        i2c: &mut I,
        reg: u8,
        layout: ConfLayout,
    ) -> Result<Conf, I::Error> {
        let bits = match layout.width {
            Width::U8 => super::read_u8(address, i2c, reg)? as u16,
            Width::U16 => super::read_u16(address, i2c, reg)?,
        };
        Ok(Conf::new(bits, layout))
    }

    pub fn write<I: I2c>(
        address: I2cAddress,
        i2c: &mut I,
        reg: u8,
        conf: Conf,
    ) -> Result<(), I::Error> {
        match conf.layout.width {
            Width::U8 => super::write_u8(address, i2c, reg, conf.bits as u8),
            Width::U16 => super::write_u16(address, i2c, reg, conf.bits),
        }
    }

    pub fn modify<I: I2c, F: FnOnce(&mut Conf)>(
        address: I2cAddress,
        i2c: &mut I,
        reg: u8,
        layout: ConfLayout,
        modify: F,
    ) -> Result<(), I::Error> {
        let mut conf = Self::read(address, i2c, reg, layout)?;
        modify(&mut conf);
        Self::write(address, i2c, reg, conf)
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn os_mode(&self) -> OsMode {
        if self.bits & self.layout.os_mode != 0 {
            OsMode::Interrupt
        } else {
            OsMode::Comparator
        }
    }

    pub fn set_os_mode(&mut self, mode: OsMode) -> &mut Self {
        let bit = match mode {
            OsMode::Comparator => 0,
            OsMode::Interrupt => self.layout.os_mode,
        };
        self.bits = (self.bits & !self.layout.os_mode) | bit;
        self
    }

    pub fn high_alert(&self, alert: &AlertLayout) -> bool {
        self.bits & alert.high != 0
    }

    pub fn low_alert(&self, alert: &AlertLayout) -> bool {
        self.bits & alert.low != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONF8: ConfLayout = ConfLayout {
        width: Width::U8,
        os_mode: 0x02,
    };

    const CONF16: ConfLayout = ConfLayout {
        width: Width::U16,
        os_mode: 0x0400,
    };

    #[test]
    fn test_set_os_mode_keeps_other_bits() {
        let mut conf = Conf::new(0b0001_1001, CONF8);
        conf.set_os_mode(OsMode::Interrupt);
        assert_eq!(0b0001_1011, conf.bits());
        assert_eq!(OsMode::Interrupt, conf.os_mode());
        conf.set_os_mode(OsMode::Comparator);
        assert_eq!(0b0001_1001, conf.bits());
        assert_eq!(OsMode::Comparator, conf.os_mode());
    }

    #[test]
    fn test_sixteen_bit_mode_bit() {
        let mut conf = Conf::new(0x60A0, CONF16);
        assert_eq!(OsMode::Comparator, conf.os_mode());
        conf.set_os_mode(OsMode::Interrupt);
        assert_eq!(0x64A0, conf.bits());
    }

    #[test]
    fn test_alert_flags() {
        let alert = AlertLayout {
            high: 0x1000,
            low: 0x0800,
        };
        let conf = Conf::new(0x1000, CONF16);
        assert!(conf.high_alert(&alert));
        assert!(!conf.low_alert(&alert));
    }
}
