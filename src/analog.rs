//! Analog inputs (A1/A2) and outputs (DA1/DA2).

use crate::channel::AnalogChannel;
use crate::error::Result;
use crate::report::{OutputCommand, OutputRegister};
use crate::session::K8055Session;
use crate::transport::HidHandle;
use log::trace;

impl<H: HidHandle> K8055Session<H> {
    /// Sets one analog output (0-255), leaving the other outputs unchanged.
    pub fn output_analog_channel(&mut self, channel: AnalogChannel, value: u8) -> Result<()> {
        trace!("Setting analog output {} to {}", channel.number(), value);
        self.apply_output(OutputCommand::SetAnalogDigital, |reg| {
            *analog_slot(reg, channel) = value
        })
    }

    /// Sets both analog outputs in one report.
    pub fn output_all_analog(&mut self, analog1: u8, analog2: u8) -> Result<()> {
        self.apply_output(OutputCommand::SetAnalogDigital, |reg| {
            reg.analog1 = analog1;
            reg.analog2 = analog2;
        })
    }

    /// Drives one analog output to full scale (255).
    pub fn set_analog_channel(&mut self, channel: AnalogChannel) -> Result<()> {
        self.output_analog_channel(channel, 0xFF)
    }

    /// Drives one analog output to zero.
    pub fn clear_analog_channel(&mut self, channel: AnalogChannel) -> Result<()> {
        self.output_analog_channel(channel, 0x00)
    }

    pub fn set_all_analog(&mut self) -> Result<()> {
        self.output_all_analog(0xFF, 0xFF)
    }

    pub fn clear_all_analog(&mut self) -> Result<()> {
        self.output_all_analog(0x00, 0x00)
    }

    /// Reads one analog input (0-255).
    pub fn read_analog_channel(&mut self, channel: AnalogChannel) -> Result<u8> {
        let snapshot = self.refreshed_snapshot()?;
        Ok(match channel {
            AnalogChannel::One => snapshot.analog1,
            AnalogChannel::Two => snapshot.analog2,
        })
    }

    /// Reads both analog inputs from the same report.
    pub fn read_all_analog(&mut self) -> Result<(u8, u8)> {
        let snapshot = self.refreshed_snapshot()?;
        Ok((snapshot.analog1, snapshot.analog2))
    }
}

fn analog_slot(reg: &mut OutputRegister, channel: AnalogChannel) -> &mut u8 {
    match channel {
        AnalogChannel::One => &mut reg.analog1,
        AnalogChannel::Two => &mut reg.analog2,
    }
}
