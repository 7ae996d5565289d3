//! Test helpers: an in-memory LM75 family device on a fake I2C bus.

use crate::drivers::sensors::lm75::{Variant, Width};
use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use std::vec::Vec;

/// Errors produced by [`SimulatedSensor`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SimulatedError {
    /// Nobody answered at the address.
    NoAcknowledge,
    /// Injected bus failure.
    Bus,
}

impl embedded_hal::i2c::Error for SimulatedError {
    fn kind(&self) -> ErrorKind {
        match self {
            SimulatedError::NoAcknowledge => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            SimulatedError::Bus => ErrorKind::Bus,
        }
    }
}

#[derive(Copy, Clone)]
struct Register {
    value: u16,
    width: Width,
}

/// A device of the given variant behind a simulated I2C bus.
///
/// Models the register pointer, 8 and 16-bit registers, and the read-only
/// alert flags that reading the configuration register clears. Failures can be injected
/// for the whole bus or for writes to a single register; a failing transfer
/// changes nothing.
pub struct SimulatedSensor {
    variant: Variant,
    address: I2cAddress,
    registers: [Option<Register>; 8],
    pointer: u8,
    fail_all: bool,
    fail_writes_to: Option<u8>,
    writes: Vec<(u8, u16)>,
}

impl SimulatedSensor {
    /// Power-on state: 25 °C, Tos 80 °C, Thyst 75 °C, configuration zero.
    pub fn new(variant: Variant) -> Self {
        let mut sensor = Self {
            variant,
            address: variant.default_address,
            registers: [None; 8],
            pointer: 0,
            fail_all: false,
            fail_writes_to: None,
            writes: Vec::new(),
        };
        let map = variant.registers;
        sensor.define(map.temp, Width::U16, 0x1900);
        sensor.define(map.conf, variant.conf.width, 0x0000);
        sensor.define(map.low, Width::U16, 0x4B00);
        sensor.define(map.high, Width::U16, 0x5000);
        if let Some(idle) = map.idle {
            sensor.define(idle, Width::U8, 0x01);
        }
        sensor
    }

    pub fn with_address(mut self, address: I2cAddress) -> Self {
        self.address = address;
        self
    }

    fn define(&mut self, reg: u8, width: Width, value: u16) {
        self.registers[reg as usize] = Some(Register { value, width });
    }

    /// Current value of a register.
    pub fn register(&self, reg: u8) -> u16 {
        self.registers
            .get(reg as usize)
            .copied()
            .flatten()
            .map(|r| r.value)
            .unwrap_or(0)
    }

    /// Change a register behind the driver's back, e.g. a new temperature.
    pub fn set_register(&mut self, reg: u8, value: u16) {
        if let Some(Some(r)) = self.registers.get_mut(reg as usize) {
            r.value = value;
        }
    }

    /// Latch the alert flags, as the device does when a threshold is crossed.
    pub fn raise_alert(&mut self, high: bool, low: bool) {
        if let Some(alert) = self.variant.alert {
            let conf = self.variant.registers.conf;
            let mut value = self.register(conf);
            if high {
                value |= alert.high;
            }
            if low {
                value |= alert.low;
            }
            self.set_register(conf, value);
        }
    }

    /// Fail every transfer until called again with `false`.
    pub fn fail_all(&mut self, fail: bool) {
        self.fail_all = fail;
    }

    /// Fail writes to `reg`.
    pub fn fail_writes_to(&mut self, reg: Option<u8>) {
        self.fail_writes_to = reg;
    }

    /// Register writes seen so far, oldest first.
    pub fn writes(&self) -> &[(u8, u16)] {
        &self.writes
    }

    fn check(&self, address: u8, operations: &[Operation<'_>]) -> Result<(), SimulatedError> {
        if address != self.address.value() {
            return Err(SimulatedError::NoAcknowledge);
        }
        if self.fail_all {
            return Err(SimulatedError::Bus);
        }
        for op in operations {
            if let Operation::Write(bytes) = op {
                if bytes.len() > 1 && Some(bytes[0]) == self.fail_writes_to {
                    return Err(SimulatedError::Bus);
                }
                if let Some(reg) = bytes.first() {
                    if self.registers.get(*reg as usize).copied().flatten().is_none() {
                        return Err(SimulatedError::NoAcknowledge);
                    }
                }
            }
        }
        Ok(())
    }

    fn store(&mut self, bytes: &[u8]) {
        let Some((&reg, data)) = bytes.split_first() else {
            return;
        };
        self.pointer = reg;
        if data.is_empty() {
            return;
        }
        // alert flags are read-only
        let flags = match self.variant.alert {
            Some(alert) if reg == self.variant.registers.conf => alert.high | alert.low,
            _ => 0,
        };
        if let Some(r) = self.registers[reg as usize].as_mut() {
            let value = match r.width {
                Width::U8 => data[0] as u16,
                Width::U16 => u16::from_be_bytes([data[0], data.get(1).copied().unwrap_or(0)]),
            };
            r.value = (value & !flags) | (r.value & flags);
            self.writes.push((reg, r.value));
        }
    }

    fn load(&mut self, buf: &mut [u8]) {
        let Some(r) = self.registers[self.pointer as usize] else {
            return;
        };
        let bytes = match r.width {
            Width::U8 => vec![r.value as u8],
            Width::U16 => r.value.to_be_bytes().to_vec(),
        };
        for (i, b) in buf.iter_mut().enumerate() {
            *b = bytes[i % bytes.len()];
        }
        if self.pointer == self.variant.registers.conf {
            if let Some(alert) = self.variant.alert {
                self.set_register(self.pointer, r.value & !(alert.high | alert.low));
            }
        }
    }
}

impl ErrorType for SimulatedSensor {
    type Error = SimulatedError;
}

impl I2c for SimulatedSensor {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.check(address, operations)?;
        for op in operations {
            match op {
                Operation::Write(bytes) => self.store(bytes),
                Operation::Read(buf) => self.load(buf),
            }
        }
        Ok(())
    }
}
