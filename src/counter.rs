//! Pulse counters and their debounce configuration, plus the combined
//! read-all/set-all operations.

use crate::channel::Counter;
use crate::debounce;
use crate::error::Result;
use crate::report::OutputCommand;
use crate::session::K8055Session;
use crate::transport::HidHandle;
use log::debug;

/// All inputs of a board, taken from a single input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllValues {
    /// Digital inputs, bit 0 = input 1.
    pub digital: u8,
    pub analog1: u8,
    pub analog2: u8,
    pub counter1: u16,
    pub counter2: u16,
}

impl<H: HidHandle> K8055Session<H> {
    /// Zeroes one counter. The other counter and all outputs are untouched.
    pub fn reset_counter(&mut self, counter: Counter) -> Result<()> {
        debug!("Resetting counter {} on board {}", counter.number(), self.address());
        let command = match counter {
            Counter::One => OutputCommand::ResetCounter1,
            Counter::Two => OutputCommand::ResetCounter2,
        };
        self.apply_output(command, |_| {})
    }

    /// Reads one counter (wraps at 65535).
    pub fn read_counter(&mut self, counter: Counter) -> Result<u16> {
        let snapshot = self.refreshed_snapshot()?;
        Ok(match counter {
            Counter::One => snapshot.counter1,
            Counter::Two => snapshot.counter2,
        })
    }

    /// Sets a counter's debounce time in milliseconds (0-7450, larger values clamp).
    pub fn set_counter_debounce_time(&mut self, counter: Counter, millis: i32) -> Result<()> {
        let value = debounce::to_hardware_byte(millis)?;
        debug!(
            "Setting counter {} debounce to {} ms (hardware value {})",
            counter.number(),
            millis,
            value
        );
        match counter {
            Counter::One => {
                self.apply_output(OutputCommand::SetDebounce1, |reg| reg.debounce1 = value)
            }
            Counter::Two => {
                self.apply_output(OutputCommand::SetDebounce2, |reg| reg.debounce2 = value)
            }
        }
    }

    /// Reads every input from one report.
    pub fn read_all_values(&mut self) -> Result<AllValues> {
        let snapshot = self.refreshed_snapshot()?;
        Ok(AllValues {
            digital: snapshot.digital,
            analog1: snapshot.analog1,
            analog2: snapshot.analog2,
            counter1: snapshot.counter1,
            counter2: snapshot.counter2,
        })
    }

    /// Sets the digital outputs and both analog outputs in one report.
    pub fn set_all_values(&mut self, digital: u8, analog1: u8, analog2: u8) -> Result<()> {
        self.apply_output(OutputCommand::SetAnalogDigital, |reg| {
            reg.digital = digital;
            reg.analog1 = analog1;
            reg.analog2 = analog2;
        })
    }
}
