//! Wire format of the K8055 input and output reports.
//!
//! Output report (9 bytes, as passed to hidapi `write()`):
//!
//! ```text
//! +----+---+---+---+---+---+---+---+---+
//! |0x01|CMD|DIG|An1|An2|Rs1|Rs2|Db1|Db2|
//! +----+---+---+---+---+---+---+---+---+
//! ```
//!
//! Every report carries the whole output register, whatever the command.
//! `Rs1`/`Rs2` are the counter reset bytes and are always zero.
//!
//! Input report (8 bytes):
//!
//! ```text
//! +---+---+---+---+---+---+---+---+
//! |DIn|Sta|A1 |A2 |   C1  |   C2  |
//! +---+---+---+---+---+---+---+---+
//! ```
//!
//! `DIn` carries inputs 1, 2, 4 and 5 in the high nibble and input 3 in bit 0.
//! `Sta` echoes the board address (see [`FirmwareVariant`](crate::FirmwareVariant)).
//! Counters are little-endian `u16`.

use crate::consts::{self, output};

/// Output report command codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCommand {
    /// Command 0.
    Reset,
    /// Store the counter 1 debounce byte.
    SetDebounce1,
    /// Store the counter 2 debounce byte.
    SetDebounce2,
    /// Zero counter 1.
    ResetCounter1,
    /// Zero counter 2.
    ResetCounter2,
    /// Update the digital outputs and both analog outputs.
    SetAnalogDigital,
}

impl OutputCommand {
    /// Command code placed in byte 1 of the output report.
    pub fn code(&self) -> u8 {
        match self {
            OutputCommand::Reset => output::cmd::RESET,
            OutputCommand::SetDebounce1 => output::cmd::SET_DEBOUNCE_1,
            OutputCommand::SetDebounce2 => output::cmd::SET_DEBOUNCE_2,
            OutputCommand::ResetCounter1 => output::cmd::RESET_COUNTER_1,
            OutputCommand::ResetCounter2 => output::cmd::RESET_COUNTER_2,
            OutputCommand::SetAnalogDigital => output::cmd::SET_ANALOG_DIGITAL,
        }
    }
}

/// Host-side copy of the board's output state.
///
/// The device has no per-field write, so this whole struct is the unit that
/// gets retransmitted whenever one field changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputRegister {
    /// Digital outputs, bit 0 = channel 1.
    pub digital: u8,
    pub analog1: u8,
    pub analog2: u8,
    /// Hardware debounce byte for counter 1.
    pub debounce1: u8,
    /// Hardware debounce byte for counter 2.
    pub debounce2: u8,
}

/// Encodes `command` together with the complete `register`.
///
/// The device has no per-field write, so every command resends the digital,
/// analog and debounce bytes. The counter reset bytes are always zero.
pub fn encode_output(command: OutputCommand, register: &OutputRegister) -> [u8; consts::OUTPUT_REPORT_LEN] {
    let mut buf = [0u8; consts::OUTPUT_REPORT_LEN];
    buf[0] = consts::OUTPUT_FRAME_MARKER;
    buf[output::CMD] = command.code();
    buf[output::DIGITAL] = register.digital;
    buf[output::ANALOG_1] = register.analog1;
    buf[output::ANALOG_2] = register.analog2;
    buf[output::RESET_COUNTER_1] = 0;
    buf[output::RESET_COUNTER_2] = 0;
    buf[output::DEBOUNCE_1] = register.debounce1;
    buf[output::DEBOUNCE_2] = register.debounce2;
    buf
}

/// The last successfully decoded input report of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Digital inputs, bit 0 = input 1 ... bit 4 = input 5.
    pub digital: u8,
    pub analog1: u8,
    pub analog2: u8,
    pub counter1: u16,
    pub counter2: u16,
    /// Raw board status byte (echoed address).
    pub status: u8,
}

impl InputSnapshot {
    /// Decodes an 8-byte input report.
    pub fn decode(report: &[u8; consts::INPUT_REPORT_LEN]) -> Self {
        use consts::input;
        InputSnapshot {
            digital: decode_digital(report[input::DIGITAL]),
            analog1: report[input::ANALOG_1],
            analog2: report[input::ANALOG_2],
            counter1: u16::from_le_bytes([report[input::COUNTER_1], report[input::COUNTER_1 + 1]]),
            counter2: u16::from_le_bytes([report[input::COUNTER_2], report[input::COUNTER_2 + 1]]),
            status: report[input::STATUS],
        }
    }
}

/// Remaps the wire digital byte to logical inputs 1-5.
/// Inputs 1/2 come from bits 4/5, input 3 from bit 0, inputs 4/5 from bits 6/7.
#[inline]
pub fn decode_digital(byte0: u8) -> u8 {
    ((byte0 >> 4) & 0x03) | ((byte0 << 2) & 0x04) | ((byte0 >> 3) & 0x18)
}
