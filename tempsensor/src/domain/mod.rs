pub mod temperature;

pub use temperature::{Celsius, Fahrenheit, Kelvin, Temperature, TemperatureScale};
