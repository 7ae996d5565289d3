//! Register access over the I2C bus.
//!
//! Every transfer starts with the register pointer byte. 16-bit registers are
//! sent and received most significant byte first.

pub mod conf;

use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::I2c;

pub fn read_u8<I: I2c>(address: I2cAddress, i2c: &mut I, reg: u8) -> Result<u8, I::Error> {
    let mut buf = [0; 1];
    i2c.write_read(address.into(), &[reg], &mut buf)?;
    trace!("read reg {:x}: {:x}", reg, buf[0]);
    Ok(buf[0])
}

pub fn read_u16<I: I2c>(address: I2cAddress, i2c: &mut I, reg: u8) -> Result<u16, I::Error> {
    let mut buf = [0; 2];
    i2c.write_read(address.into(), &[reg], &mut buf)?;
    let value = u16::from_be_bytes(buf);
    trace!("read reg {:x}: {:x}", reg, value);
    Ok(value)
}

pub fn write_u8<I: I2c>(
    address: I2cAddress,
    i2c: &mut I,
    reg: u8,
    value: u8,
) -> Result<(), I::Error> {
    trace!("write reg {:x}: {:x}", reg, value);
    i2c.write(address.into(), &[reg, value])
}

pub fn write_u16<I: I2c>(
    address: I2cAddress,
    i2c: &mut I,
    reg: u8,
    value: u16,
) -> Result<(), I::Error> {
    trace!("write reg {:x}: {:x}", reg, value);
    let [msb, lsb] = value.to_be_bytes();
    i2c.write(address.into(), &[reg, msb, lsb])
}

/// Read-modify-write of an 8-bit register.
pub fn modify_u8<I: I2c, F: FnOnce(u8) -> u8>(
    address: I2cAddress,
    i2c: &mut I,
    reg: u8,
    modify: F,
) -> Result<(), I::Error> {
    let value = read_u8(address, i2c, reg)?;
    write_u8(address, i2c, reg, modify(value))
}

/// Read-modify-write of a 16-bit register.
pub fn modify_u16<I: I2c, F: FnOnce(u16) -> u16>(
    address: I2cAddress,
    i2c: &mut I,
    reg: u8,
    modify: F,
) -> Result<(), I::Error> {
    let value = read_u16(address, i2c, reg)?;
    write_u16(address, i2c, reg, modify(value))
}
