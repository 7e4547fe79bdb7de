//! GPIO access for physical buttons and LEDs.
//!
//! Pins are always addressed by their BCM (Broadcom SoC channel) number.

mod simulated;
#[cfg(feature = "rpi")]
mod rpi;

use std::fmt;

use thiserror::Error;

pub use simulated::SimulatedGpio;

/// Pin addressing scheme. Only BCM is used; physical header numbering is not
/// supported.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinNumbering {
    /// Broadcom SoC channel numbers.
    Bcm,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GpioError {
    #[error("GPIO unavailable: {0}")]
    Unavailable(String),
    #[error("pin {0} is not set up as an output")]
    NotConfigured(u8),
    /// The driver rejected an operation on `pin`.
    #[cfg_attr(not(feature = "rpi"), allow(dead_code))]
    #[error("pin {pin}: {reason}")]
    Pin { pin: u8, reason: String },
}

pub trait Gpio: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn set_mode(&mut self, numbering: PinNumbering) -> Result<(), GpioError>;

    /// Claim `pin` as an output, driven low.
    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError>;

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError>;

    /// Release every claimed pin.
    fn cleanup(&mut self);
}

/// Open the board's GPIO controller.
#[cfg(feature = "rpi")]
pub fn open_hardware() -> Result<Box<dyn Gpio>, GpioError> {
    Ok(Box::new(rpi::RpiGpio::open()?))
}

#[cfg(not(feature = "rpi"))]
pub fn open_hardware() -> Result<Box<dyn Gpio>, GpioError> {
    Err(GpioError::Unavailable(
        "built without the `rpi` feature".to_string(),
    ))
}
