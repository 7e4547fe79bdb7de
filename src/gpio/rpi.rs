use std::collections::HashMap;

use rppal::gpio::{Gpio as Controller, OutputPin};

use super::{Gpio, GpioError, Level, PinNumbering};

/// GPIO on a Raspberry Pi through `rppal`. rppal only speaks BCM numbering.
pub struct RpiGpio {
    controller: Controller,
    outputs: HashMap<u8, OutputPin>,
}

impl RpiGpio {
    pub fn open() -> Result<Self, GpioError> {
        let controller = Controller::new().map_err(|e| GpioError::Unavailable(e.to_string()))?;
        Ok(Self {
            controller,
            outputs: HashMap::new(),
        })
    }
}

impl Gpio for RpiGpio {
    fn name(&self) -> &'static str {
        "rppal"
    }

    fn set_mode(&mut self, numbering: PinNumbering) -> Result<(), GpioError> {
        match numbering {
            PinNumbering::Bcm => Ok(()),
        }
    }

    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError> {
        let output = self
            .controller
            .get(pin)
            .map_err(|e| GpioError::Pin {
                pin,
                reason: e.to_string(),
            })?
            .into_output_low();
        self.outputs.insert(pin, output);
        tracing::debug!(pin, "GPIO output ready");
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        let output = self
            .outputs
            .get_mut(&pin)
            .ok_or(GpioError::NotConfigured(pin))?;
        match level {
            Level::Low => output.set_low(),
            Level::High => output.set_high(),
        }
        Ok(())
    }

    fn cleanup(&mut self) {
        // Dropping an OutputPin restores the pin's previous mode.
        self.outputs.clear();
    }
}
