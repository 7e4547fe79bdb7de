use std::collections::BTreeMap;

use super::{Gpio, GpioError, Level, PinNumbering};

/// In-memory GPIO that logs every call. Used off the board.
#[derive(Debug, Default)]
pub struct SimulatedGpio {
    pins: BTreeMap<u8, Level>,
}

impl SimulatedGpio {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.pins.get(&pin).copied()
    }
}

impl Gpio for SimulatedGpio {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn set_mode(&mut self, numbering: PinNumbering) -> Result<(), GpioError> {
        tracing::info!(?numbering, "simulated GPIO: set mode");
        Ok(())
    }

    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError> {
        tracing::info!(pin, "simulated GPIO: set up output");
        self.pins.insert(pin, Level::Low);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        let slot = self
            .pins
            .get_mut(&pin)
            .ok_or(GpioError::NotConfigured(pin))?;
        tracing::info!(pin, %level, "simulated GPIO: write");
        *slot = level;
        Ok(())
    }

    fn cleanup(&mut self) {
        tracing::info!("simulated GPIO: cleanup");
        self.pins.clear();
    }
}
