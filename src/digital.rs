//! Digital outputs (1-8) and inputs (1-5).

use crate::channel::{DigitalInput, DigitalOutput};
use crate::error::Result;
use crate::report::OutputCommand;
use crate::session::K8055Session;
use crate::transport::HidHandle;
use log::trace;

impl<H: HidHandle> K8055Session<H> {
    // --- Outputs ---

    /// Replaces the whole digital output mask (bit 0 = channel 1).
    pub fn write_all_digital(&mut self, mask: u8) -> Result<()> {
        self.apply_output(OutputCommand::SetAnalogDigital, |reg| reg.digital = mask)
    }

    /// Switches one digital output on, leaving the others as they are.
    pub fn set_digital_channel(&mut self, channel: DigitalOutput) -> Result<()> {
        trace!("Setting digital output {}", channel.number());
        self.apply_output(OutputCommand::SetAnalogDigital, |reg| {
            reg.digital |= channel.mask()
        })
    }

    /// Switches one digital output off, leaving the others as they are.
    pub fn clear_digital_channel(&mut self, channel: DigitalOutput) -> Result<()> {
        trace!("Clearing digital output {}", channel.number());
        self.apply_output(OutputCommand::SetAnalogDigital, |reg| {
            reg.digital &= !channel.mask()
        })
    }

    pub fn set_all_digital(&mut self) -> Result<()> {
        self.write_all_digital(0xFF)
    }

    pub fn clear_all_digital(&mut self) -> Result<()> {
        self.write_all_digital(0x00)
    }

    // --- Inputs ---

    /// Reads all five digital inputs (bit 0 = input 1).
    pub fn read_all_digital(&mut self) -> Result<u8> {
        Ok(self.refreshed_snapshot()?.digital)
    }

    /// Reads one digital input.
    pub fn read_digital_channel(&mut self, channel: DigitalInput) -> Result<bool> {
        Ok(self.read_all_digital()? & channel.mask() != 0)
    }
}
