//! Board addressing and identification.

use crate::consts;
use crate::error::{Error, Result};
use std::ffi::CString;
use std::fmt;

/// Represents a valid board address (0-3), as selected by the SK5/SK6 jumpers.
/// Use `BoardAddress::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardAddress(u8);

impl BoardAddress {
    /// All four board addresses in ascending order.
    pub const ALL: [BoardAddress; consts::MAX_BOARDS] =
        [BoardAddress(0), BoardAddress(1), BoardAddress(2), BoardAddress(3)];

    /// Creates a new BoardAddress, returning an error if the number is out of range (0-3).
    pub fn new(address: u8) -> Result<Self> {
        if (address as usize) < consts::MAX_BOARDS {
            Ok(BoardAddress(address))
        } else {
            Err(Error::AddressOutOfRange { address })
        }
    }

    /// Returns the underlying address (0-3).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Registry slot index for this address.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }

    /// USB product ID a board with this address enumerates with.
    #[inline]
    pub fn product_id(&self) -> u16 {
        consts::K8055_PID_BASE + self.0 as u16
    }

    /// Maps a product ID back to a board address, if it is one of ours.
    pub fn from_product_id(pid: u16) -> Option<Self> {
        pid.checked_sub(consts::K8055_PID_BASE)
            .filter(|offset| (*offset as usize) < consts::MAX_BOARDS)
            .map(|offset| BoardAddress(offset as u8))
    }

    /// Returns the firmware variant whose status byte matches this address, if any.
    pub fn match_status(&self, status: u8) -> Option<FirmwareVariant> {
        FirmwareVariant::ALL
            .into_iter()
            .find(|variant| variant.status_byte(*self) == status)
    }
}

impl fmt::Display for BoardAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for BoardAddress {
    type Error = Error;

    fn try_from(address: u8) -> Result<Self> {
        BoardAddress::new(address)
    }
}

/// Firmware revisions, distinguished by how they echo the board address
/// in byte 1 of every input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareVariant {
    /// Original K8055 / VM110: status = address + 1.
    K8055,
    /// K8055N / VM110N: status = address + 10.
    K8055N,
}

impl FirmwareVariant {
    /// All known variants, in the order status bytes are checked.
    pub const ALL: [FirmwareVariant; 2] = [FirmwareVariant::K8055, FirmwareVariant::K8055N];

    #[inline]
    fn status_offset(&self) -> u8 {
        match self {
            FirmwareVariant::K8055 => 1,
            FirmwareVariant::K8055N => 10,
        }
    }

    /// Status byte this firmware reports for `address`.
    #[inline]
    pub fn status_byte(&self, address: BoardAddress) -> u8 {
        address.number() + self.status_offset()
    }
}

/// Information about a discovered K8055 board.
/// Can be used to show the user which boards are connected before opening one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInfo {
    /// Board address decoded from the product ID.
    pub address: BoardAddress,
    pub vendor_id: u16,
    pub product_id: u16,
    /// The unique, platform-specific path to the HID device.
    pub path: CString,
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
}

/// Set of board addresses found on the host, one bit per address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardMask(u8);

impl BoardMask {
    /// Adds an address to the set.
    pub fn insert(&mut self, address: BoardAddress) {
        self.0 |= 1 << address.number();
    }

    /// Checks whether an address is in the set.
    pub fn contains(&self, address: BoardAddress) -> bool {
        self.0 & (1 << address.number()) != 0
    }

    /// Raw bitmask (bit n = board n present).
    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates present addresses in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = BoardAddress> + '_ {
        BoardAddress::ALL
            .into_iter()
            .filter(move |address| self.contains(*address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_address_range() {
        for n in 0..4 {
            assert_eq!(BoardAddress::new(n).unwrap().number(), n);
        }
        assert!(matches!(
            BoardAddress::new(4),
            Err(Error::AddressOutOfRange { address: 4 })
        ));
        assert!(BoardAddress::try_from(255).is_err());
    }

    #[test]
    fn test_product_id_mapping() {
        let addr = BoardAddress::new(2).unwrap();
        assert_eq!(addr.product_id(), 0x5502);
        assert_eq!(BoardAddress::from_product_id(0x5502), Some(addr));
        assert_eq!(BoardAddress::from_product_id(0x5504), None);
        assert_eq!(BoardAddress::from_product_id(0x54FF), None);
        assert_eq!(BoardAddress::from_product_id(0x0000), None);
    }

    #[test]
    fn test_status_variants() {
        let addr = BoardAddress::new(1).unwrap();
        assert_eq!(addr.match_status(2), Some(FirmwareVariant::K8055));
        assert_eq!(addr.match_status(11), Some(FirmwareVariant::K8055N));
        assert_eq!(addr.match_status(1), None);
        assert_eq!(addr.match_status(12), None);
    }

    #[test]
    fn test_board_mask() {
        let mut mask = BoardMask::default();
        assert!(mask.is_empty());
        mask.insert(BoardAddress::new(0).unwrap());
        mask.insert(BoardAddress::new(3).unwrap());
        assert_eq!(mask.bits(), 0b1001);
        let present: Vec<u8> = mask.iter().map(|a| a.number()).collect();
        assert_eq!(present, vec![0, 3]);
    }
}
