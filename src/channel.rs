use crate::error::{channel_out_of_range, Result};

/// Represents a valid digital output channel (1-8).
/// Use `DigitalOutput::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitalOutput(u8);

impl DigitalOutput {
    /// Creates a new DigitalOutput, returning an error if the number is out of range (1-8).
    pub fn new(channel: u8) -> Result<Self> {
        if (1..=8).contains(&channel) {
            Ok(DigitalOutput(channel))
        } else {
            Err(channel_out_of_range("Digital output", channel, 1, 8))
        }
    }

    /// Returns the underlying channel number (1-8).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the bit mask (1 << (channel - 1)) within the digital output byte.
    #[inline]
    pub fn mask(&self) -> u8 {
        1u8 << (self.0 - 1)
    }
}

/// Represents a valid digital input channel (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitalInput(u8);

impl DigitalInput {
    /// Creates a new DigitalInput, returning an error if the number is out of range (1-5).
    pub fn new(channel: u8) -> Result<Self> {
        if (1..=5).contains(&channel) {
            Ok(DigitalInput(channel))
        } else {
            Err(channel_out_of_range("Digital input", channel, 1, 5))
        }
    }

    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the bit mask within the decoded (logical) digital input byte.
    #[inline]
    pub fn mask(&self) -> u8 {
        1u8 << (self.0 - 1)
    }
}

/// Analog channel selector. The board has two analog inputs and two analog
/// (PWM-capable) outputs, numbered 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogChannel {
    /// Analog channel 1 (A1 / DA1).
    One,
    /// Analog channel 2 (A2 / DA2).
    Two,
}

impl AnalogChannel {
    /// Creates an AnalogChannel from its number (1 or 2).
    pub fn new(channel: u8) -> Result<Self> {
        match channel {
            1 => Ok(AnalogChannel::One),
            2 => Ok(AnalogChannel::Two),
            _ => Err(channel_out_of_range("Analog", channel, 1, 2)),
        }
    }

    #[inline]
    pub fn number(&self) -> u8 {
        match self {
            AnalogChannel::One => 1,
            AnalogChannel::Two => 2,
        }
    }
}

/// Hardware pulse counter selector (counters are fed by digital inputs 1 and 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Counter 1.
    One,
    /// Counter 2.
    Two,
}

impl Counter {
    /// Creates a Counter from its number (1 or 2).
    pub fn new(counter: u8) -> Result<Self> {
        match counter {
            1 => Ok(Counter::One),
            2 => Ok(Counter::Two),
            _ => Err(channel_out_of_range("Counter", counter, 1, 2)),
        }
    }

    #[inline]
    pub fn number(&self) -> u8 {
        match self {
            Counter::One => 1,
            Counter::Two => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_digital_output_creation() {
        assert!(DigitalOutput::new(0).is_err());
        assert!(DigitalOutput::new(9).is_err());
        for n in 1..=8 {
            let ch = DigitalOutput::new(n).unwrap();
            assert_eq!(ch.number(), n);
            assert_eq!(ch.mask(), 1 << (n - 1));
        }
    }

    #[test]
    fn test_digital_input_creation() {
        assert!(DigitalInput::new(0).is_err());
        assert!(DigitalInput::new(6).is_err());
        assert_eq!(DigitalInput::new(5).unwrap().mask(), 0b1_0000);
    }

    #[test]
    fn test_analog_and_counter_creation() {
        assert_eq!(AnalogChannel::new(2).unwrap(), AnalogChannel::Two);
        assert_eq!(Counter::new(1).unwrap().number(), 1);
        match AnalogChannel::new(3) {
            Err(Error::ChannelOutOfRange {
                channel, min, max, ..
            }) => {
                assert_eq!((channel, min, max), (3, 1, 2));
            }
            other => panic!("Expected ChannelOutOfRange, got: {:?}", other),
        }
        assert!(Counter::new(0).is_err());
    }
}
