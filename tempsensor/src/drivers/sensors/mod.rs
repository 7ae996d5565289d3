pub mod lm75;
