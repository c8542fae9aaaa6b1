use crate::board::BoardAddress;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when using K8055 boards.
///
/// Every variant is a local, recoverable condition. Whether a failure is
/// fatal (e.g. tearing down a polling loop) is left to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying HID API layer.
    #[error("HID API error: {0}")]
    Hid(#[from] hidapi::HidError),
    /// Board address is outside 0-3.
    #[error("Board address {address} out of range (0-3)")]
    AddressOutOfRange {
        /// The rejected address.
        address: u8,
    },
    /// Channel, input or counter number is outside the valid range for its kind.
    #[error("{kind} channel {channel} out of range ({min}-{max})")]
    ChannelOutOfRange {
        /// Which kind of channel was addressed ("digital output", "analog", ...).
        kind: &'static str,
        /// The rejected channel number.
        channel: u8,
        /// Lowest valid channel number.
        min: u8,
        /// Highest valid channel number.
        max: u8,
    },
    /// No HID device with the board's VID/PID is visible to the host.
    #[error("No K8055 board found for address {address} (VID={vendor_id:04X}, PID={product_id:04X})")]
    NoDeviceFound {
        /// The requested board address.
        address: BoardAddress,
        /// Vendor ID that was searched for.
        vendor_id: u16,
        /// Product ID that was searched for.
        product_id: u16,
    },
    /// A session is already open for this board address.
    #[error("Board {address} is already open")]
    AlreadyOpen {
        /// The occupied address.
        address: BoardAddress,
    },
    /// No session is open for this board address.
    #[error("Board {address} is not open")]
    NotOpen {
        /// The free address.
        address: BoardAddress,
    },
    /// The device returned a malformed input report or one from another board.
    /// The last good input snapshot is kept; retry on the next poll.
    #[error("Read failure on board {address}: {kind}")]
    ReadFailure {
        /// Board the read was issued to.
        address: BoardAddress,
        /// What was wrong with the report.
        kind: ReadFailureKind,
    },
    /// The transport accepted fewer bytes than a full output report.
    #[error("Write failure on board {address}: expected {expected} bytes written, got {actual}")]
    WriteFailure {
        /// Board the write was issued to.
        address: BoardAddress,
        /// Full output report length.
        expected: usize,
        /// Bytes the transport reported as written.
        actual: usize,
    },
    /// Function argument is outside the valid range.
    #[error("Argument out of range: {0}")]
    OutOfRange(String),
}

/// Reason an input report was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailureKind {
    /// The report had neither 0 nor 8 bytes.
    UnexpectedLength(usize),
    /// The status byte does not identify the expected board.
    StatusMismatch(u8),
}

impl fmt::Display for ReadFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailureKind::UnexpectedLength(len) => {
                write!(f, "unexpected report size ({} bytes)", len)
            }
            ReadFailureKind::StatusMismatch(status) => {
                write!(f, "board status byte 0x{:02X} does not match", status)
            }
        }
    }
}

/// Result type alias for K8055 operations.
///
/// This is a convenience alias for `std::result::Result<T, Error>` used
/// throughout the crate to reduce boilerplate.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn channel_out_of_range(kind: &'static str, channel: u8, min: u8, max: u8) -> Error {
    Error::ChannelOutOfRange {
        kind,
        channel,
        min,
        max,
    }
}
