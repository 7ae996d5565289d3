//! Driver for the LM75B family of digital temperature sensors and thermal
//! watchdogs: LM75B, PCT2075, P3T1755 and P3T1085.
//!
//! One driver type serves every device; the device specific parts (register
//! resolution, configuration register layout, optional features) come from a
//! [`Variant`] descriptor chosen at construction.
//!
//! ```ignore
//! let mut sensor = TempSensor::new(i2c, P3T1085);
//! sensor.set_thresholds(75.0, 20.0)?;
//! sensor.set_os_mode(OsMode::Interrupt)?;
//! let t = sensor.temp()?;
//! if sensor.clear()? {
//!     // went above 75 °C since the last clear
//! }
//! ```
//!
//! The sensor owns its bus handle. To put several devices on one bus, give
//! each a shared-bus device from the application.

mod codec;
pub mod register;
pub mod variant;

pub use codec::{decode, encode, Alignment, Format};
pub use register::conf::{Conf, OsMode};
pub use variant::{
    AlertLayout, Capability, ConfLayout, RegisterMap, Variant, Width, LM75B, P3T1085, P3T1755,
    PCT2075,
};

use crate::domain::temperature::{Celsius, Temperature};
use crate::traits::i2c::I2cAddress;
use crate::traits::sensors::temperature::TemperatureSensor;
use core::fmt::{Debug, Display, Formatter};
use embedded_hal::i2c::I2c;

/// Mask of the Tidle field.
const IDLE_MASK: u8 = 0x1F;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transfer failed (no ACK, bus error, timeout).
    I2c(E),
    /// The device does not have the feature.
    Unsupported(Capability),
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C bus error: {:?}", e),
            Error::Unsupported(capability) => write!(f, "not supported: {:?}", capability),
        }
    }
}

fn bus_error<E>(op: &'static str, e: E) -> Error<E> {
    warn!("{} failed", op);
    Error::I2c(e)
}

pub struct TempSensor<I> {
    i2c: I,
    address: I2cAddress,
    variant: Variant,
}

impl<I: I2c> TempSensor<I> {
    /// Sensor at the variant's default address.
    pub fn new(i2c: I, variant: Variant) -> Self {
        Self::with_address(i2c, variant, variant.default_address)
    }

    pub fn with_address(i2c: I, variant: Variant, address: I2cAddress) -> Self {
        debug!("{} at address {:x}", variant.name, address.value());
        Self {
            i2c,
            address,
            variant,
        }
    }

    pub fn address(&self) -> I2cAddress {
        self.address
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Give back the bus handle.
    pub fn release(self) -> I {
        self.i2c
    }

    /// `true` when the device acknowledges its address.
    pub fn ping(&mut self) -> bool {
        self.i2c.write(self.address.into(), &[]).is_ok()
    }

    /// Current temperature. Every call reads the device.
    pub fn temp(&mut self) -> Result<Temperature<Celsius>, Error<I::Error>> {
        let raw = register::read_u16(self.address, &mut self.i2c, self.variant.registers.temp)
            .map_err(|e| bus_error("temperature read", e))?;
        Ok(decode(raw, &self.variant.temperature))
    }

    /// Same as [`TempSensor::temp`].
    pub fn read(&mut self) -> Result<Temperature<Celsius>, Error<I::Error>> {
        self.temp()
    }

    /// Program the alarm band. The higher of the two values becomes the
    /// overtemperature (Tos/T_HIGH) threshold, the lower one the hysteresis
    /// (Thyst/T_LOW), whatever the argument order.
    ///
    /// Values are truncated toward zero to the register resolution and
    /// saturate at its range; NaN counts as zero. The order is decided on the
    /// encoded values, so the programmed low threshold never exceeds the high
    /// one. The high threshold is written first; if writing the low one fails,
    /// the device keeps the new high and the old low threshold and the error
    /// is returned.
    pub fn set_thresholds(&mut self, v0: f32, v1: f32) -> Result<(), Error<I::Error>> {
        let format = self.variant.threshold;
        let registers = self.variant.registers;
        let r0 = encode(v0.into(), &format);
        let r1 = encode(v1.into(), &format);
        let (low, high) = if format.count(r0) <= format.count(r1) {
            (r0, r1)
        } else {
            (r1, r0)
        };
        debug!(
            "{} thresholds: low {}, high {}",
            self.variant.name,
            decode(low, &format),
            decode(high, &format)
        );

        register::write_u16(self.address, &mut self.i2c, registers.high, high)
            .map_err(|e| bus_error("high threshold write", e))?;
        register::write_u16(self.address, &mut self.i2c, registers.low, low)
            .map_err(|e| bus_error("low threshold write", e))
    }

    /// Programmed alarm band as `(low, high)`.
    pub fn thresholds(
        &mut self,
    ) -> Result<(Temperature<Celsius>, Temperature<Celsius>), Error<I::Error>> {
        let format = self.variant.threshold;
        let registers = self.variant.registers;
        let low = register::read_u16(self.address, &mut self.i2c, registers.low)
            .map_err(|e| bus_error("low threshold read", e))?;
        let high = register::read_u16(self.address, &mut self.i2c, registers.high)
            .map_err(|e| bus_error("high threshold read", e))?;
        Ok((decode(low, &format), decode(high, &format)))
    }

    /// Select comparator or interrupt behaviour of the OS output. Other
    /// configuration bits are preserved.
    ///
    /// On devices with latched alert flags this reads the configuration
    /// register, which acknowledges a pending alert just like [`Self::clear`].
    pub fn set_os_mode(&mut self, mode: OsMode) -> Result<(), Error<I::Error>> {
        debug!("{} OS mode: {:?}", self.variant.name, mode);
        Conf::modify(
            self.address,
            &mut self.i2c,
            self.variant.registers.conf,
            self.variant.conf,
            |conf| {
                conf.set_os_mode(mode);
            },
        )
        .map_err(|e| bus_error("OS mode update", e))
    }

    /// Current OS output mode. Acknowledges a pending alert on devices with
    /// latched alert flags.
    pub fn os_mode(&mut self) -> Result<OsMode, Error<I::Error>> {
        Ok(self.conf()?.os_mode())
    }

    /// Configuration register as last read from the device.
    ///
    /// The read acknowledges a pending alert on devices with latched alert
    /// flags; the returned value still holds the flags as they were.
    pub fn conf(&mut self) -> Result<Conf, Error<I::Error>> {
        Conf::read(
            self.address,
            &mut self.i2c,
            self.variant.registers.conf,
            self.variant.conf,
        )
        .map_err(|e| bus_error("configuration read", e))
    }

    /// Acknowledge the alert. Returns `true` if the high temperature flag
    /// (FH) was set. Reading the configuration register clears the latched
    /// flags.
    pub fn clear(&mut self) -> Result<bool, Error<I::Error>> {
        let alert = self
            .variant
            .alert
            .ok_or(Error::Unsupported(Capability::AlertClear))?;
        let conf = self.conf()?;
        let high = conf.high_alert(&alert);
        debug!(
            "{} alert cleared, high: {}, low: {}",
            self.variant.name,
            high,
            conf.low_alert(&alert)
        );
        Ok(high)
    }

    /// Set the sample period, in 100 ms steps (0..=31).
    pub fn set_idle_time(&mut self, units: u8) -> Result<(), Error<I::Error>> {
        let reg = self.idle_register()?;
        debug!("{} idle time: {}", self.variant.name, units & IDLE_MASK);
        register::modify_u8(self.address, &mut self.i2c, reg, |v| {
            (v & !IDLE_MASK) | (units & IDLE_MASK)
        })
        .map_err(|e| bus_error("idle time update", e))
    }

    /// Sample period, in 100 ms steps.
    pub fn idle_time(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.idle_register()?;
        let value = register::read_u8(self.address, &mut self.i2c, reg)
            .map_err(|e| bus_error("idle time read", e))?;
        Ok(value & IDLE_MASK)
    }

    fn idle_register(&self) -> Result<u8, Error<I::Error>> {
        self.variant
            .registers
            .idle
            .ok_or(Error::Unsupported(Capability::IdleTime))
    }

    pub fn read_u8(&mut self, reg: u8) -> Result<u8, Error<I::Error>> {
        register::read_u8(self.address, &mut self.i2c, reg)
            .map_err(|e| bus_error("register read", e))
    }

    pub fn read_u16(&mut self, reg: u8) -> Result<u16, Error<I::Error>> {
        register::read_u16(self.address, &mut self.i2c, reg)
            .map_err(|e| bus_error("register read", e))
    }

    pub fn write_u8(&mut self, reg: u8, value: u8) -> Result<(), Error<I::Error>> {
        register::write_u8(self.address, &mut self.i2c, reg, value)
            .map_err(|e| bus_error("register write", e))
    }

    pub fn write_u16(&mut self, reg: u8, value: u16) -> Result<(), Error<I::Error>> {
        register::write_u16(self.address, &mut self.i2c, reg, value)
            .map_err(|e| bus_error("register write", e))
    }

    pub fn modify_u8<F: FnOnce(u8) -> u8>(
        &mut self,
        reg: u8,
        modify: F,
    ) -> Result<(), Error<I::Error>> {
        register::modify_u8(self.address, &mut self.i2c, reg, modify)
            .map_err(|e| bus_error("register update", e))
    }

    pub fn modify_u16<F: FnOnce(u16) -> u16>(
        &mut self,
        reg: u8,
        modify: F,
    ) -> Result<(), Error<I::Error>> {
        register::modify_u16(self.address, &mut self.i2c, reg, modify)
            .map_err(|e| bus_error("register update", e))
    }
}

impl<I: I2c> TemperatureSensor<Celsius> for TempSensor<I> {
    type Error = Error<I::Error>;

    fn temperature(&mut self) -> Result<Temperature<Celsius>, Self::Error> {
        self.temp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_temp() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(0x48, vec![0x00], vec![0x4B, 0x00]),
            I2cTransaction::write_read(0x48, vec![0x00], vec![0xC9, 0x00]),
            I2cTransaction::write_read(0x48, vec![0x00], vec![0x19, 0x20]),
        ]);
        let mut sensor = TempSensor::new(i2c, LM75B);
        assert_eq!(75.0, sensor.temp().unwrap().raw_value());
        assert_eq!(-55.0, sensor.read().unwrap().raw_value());
        assert_eq!(25.125, sensor.temp().unwrap().raw_value());
        sensor.release().done();
    }

    #[test]
    fn test_temp_high_resolution() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            0x4C,
            vec![0x00],
            vec![0xE6, 0xF0],
        )]);
        let mut sensor = TempSensor::new(i2c, P3T1755);
        assert_eq!(-25.0625, sensor.temp().unwrap().raw_value());
        sensor.release().done();
    }

    #[test]
    fn test_address_override() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            0x4F,
            vec![0x00],
            vec![0x19, 0x00],
        )]);
        let mut sensor = TempSensor::with_address(i2c, PCT2075, I2cAddress::new(0x4F));
        assert_eq!(0x4F, sensor.address().value());
        assert_eq!(25.0, sensor.temp().unwrap().raw_value());
        sensor.release().done();
    }

    #[test]
    fn test_thresholds_order_independent() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x03, 0x4B, 0x00]),
            I2cTransaction::write(0x48, vec![0x02, 0x14, 0x00]),
        ];
        for (v0, v1) in [(20.0, 75.0), (75.0, 20.0)] {
            let i2c = I2cMock::new(&expectations);
            let mut sensor = TempSensor::new(i2c, LM75B);
            sensor.set_thresholds(v0, v1).unwrap();
            sensor.release().done();
        }
    }

    #[test]
    fn test_thresholds_high_resolution() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x4C, vec![0x03, 0x4B, 0x10]),
            I2cTransaction::write(0x4C, vec![0x02, 0xF9, 0xC0]),
            I2cTransaction::write_read(0x4C, vec![0x02], vec![0xF9, 0xC0]),
            I2cTransaction::write_read(0x4C, vec![0x03], vec![0x4B, 0x10]),
        ]);
        let mut sensor = TempSensor::new(i2c, P3T1755);
        sensor.set_thresholds(75.0625, -6.25).unwrap();
        let (low, high) = sensor.thresholds().unwrap();
        assert_eq!(-6.25, low.raw_value());
        assert_eq!(75.0625, high.raw_value());
        sensor.release().done();
    }

    #[test]
    fn test_thresholds_truncate_to_register_resolution() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x48, vec![0x03, 0x4B, 0x00]),
            I2cTransaction::write(0x48, vec![0x02, 0x14, 0x00]),
        ]);
        let mut sensor = TempSensor::new(i2c, LM75B);
        sensor.set_thresholds(75.3, 20.4).unwrap();
        sensor.release().done();
    }

    #[test]
    fn test_thresholds_nan_counts_as_zero() {
        let expectations = [
            I2cTransaction::write(0x48, vec![0x03, 0x14, 0x00]),
            I2cTransaction::write(0x48, vec![0x02, 0x00, 0x00]),
        ];
        for (v0, v1) in [(f32::NAN, 20.0), (20.0, f32::NAN)] {
            let i2c = I2cMock::new(&expectations);
            let mut sensor = TempSensor::new(i2c, LM75B);
            sensor.set_thresholds(v0, v1).unwrap();
            sensor.release().done();
        }
    }

    #[test]
    fn test_os_mode_eight_bit() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(0x48, vec![0x01], vec![0b0001_1001]),
            I2cTransaction::write(0x48, vec![0x01, 0b0001_1011]),
            I2cTransaction::write_read(0x48, vec![0x01], vec![0b0001_1011]),
        ]);
        let mut sensor = TempSensor::new(i2c, LM75B);
        sensor.set_os_mode(OsMode::Interrupt).unwrap();
        assert_eq!(OsMode::Interrupt, sensor.os_mode().unwrap());
        sensor.release().done();
    }

    #[test]
    fn test_os_mode_sixteen_bit() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(0x4C, vec![0x01], vec![0x64, 0xA0]),
            I2cTransaction::write(0x4C, vec![0x01, 0x60, 0xA0]),
        ]);
        let mut sensor = TempSensor::new(i2c, P3T1085);
        sensor.set_os_mode(OsMode::Comparator).unwrap();
        sensor.release().done();
    }

    #[test]
    fn test_clear() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(0x4C, vec![0x01], vec![0x14, 0xA0]),
            I2cTransaction::write_read(0x4C, vec![0x01], vec![0x04, 0xA0]),
        ]);
        let mut sensor = TempSensor::new(i2c, P3T1085);
        assert!(sensor.clear().unwrap());
        assert!(!sensor.clear().unwrap());
        sensor.release().done();
    }

    #[test]
    fn test_unsupported_capability_skips_bus() {
        let i2c = I2cMock::new(&[]);
        let mut sensor = TempSensor::new(i2c, LM75B);
        assert_eq!(
            Err(Error::Unsupported(Capability::AlertClear)),
            sensor.clear()
        );
        assert_eq!(
            Err(Error::Unsupported(Capability::IdleTime)),
            sensor.set_idle_time(3)
        );
        sensor.release().done();
    }

    #[test]
    fn test_idle_time() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write_read(0x48, vec![0x04], vec![0b1110_0001]),
            I2cTransaction::write(0x48, vec![0x04, 0b1110_1010]),
            I2cTransaction::write_read(0x48, vec![0x04], vec![0b1110_1010]),
        ]);
        let mut sensor = TempSensor::new(i2c, PCT2075);
        sensor.set_idle_time(10).unwrap();
        assert_eq!(10, sensor.idle_time().unwrap());
        sensor.release().done();
    }

    #[test]
    fn test_ping() {
        let i2c = I2cMock::new(&[I2cTransaction::write(0x4C, vec![])]);
        let mut sensor = TempSensor::new(i2c, P3T1755);
        assert!(sensor.ping());
        sensor.release().done();
    }
}
