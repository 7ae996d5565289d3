#![cfg_attr(not(any(test, feature = "std")), no_std)]
//! Drivers for the LM75B family of I2C digital temperature sensors and
//! thermal watchdogs (LM75B, PCT2075, P3T1755, P3T1085), built on the
//! [embedded-hal](https://docs.rs/embedded-hal) 1.0 blocking I2C traits.
//!
//! The devices share one register layout and differ in resolution and in a
//! few optional features. A single [`TempSensor`] driver covers all of them,
//! parameterized by a [`Variant`] descriptor:
//!
//! ```ignore
//! use drogue_tempsensor::*;
//!
//! let mut sensor = TempSensor::new(i2c, LM75B);
//! let t = sensor.temp()?;
//! sensor.set_thresholds(20.0, 75.0)?;
//! sensor.set_os_mode(OsMode::Comparator)?;
//! ```
//!
//! # Features
//!
//! * `std` - host builds; enables [`testutil`], a simulated sensor usable as
//!   an I2C bus in tests.
//! * `log` - log through the `log` crate.
//! * `defmt` - log through `defmt` and derive `defmt::Format` for public types.

pub(crate) mod fmt;

pub mod domain;

pub mod traits;

pub mod drivers;

#[cfg(feature = "std")]
pub mod testutil;

pub use domain::temperature::{Celsius, Fahrenheit, Kelvin, Temperature};
pub use drivers::sensors::lm75::{
    Capability, Conf, Error, Format, OsMode, TempSensor, Variant, LM75B, P3T1085, P3T1755,
    PCT2075,
};
pub use traits::i2c::I2cAddress;
pub use traits::sensors::temperature::TemperatureSensor;
