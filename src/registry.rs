//! The four board slots of one host.

use crate::board::{BoardAddress, BoardInfo, BoardMask};
use crate::consts;
use crate::error::{Error, Result};
use crate::session::{K8055Session, ReadPolicy};
use crate::transport::HidTransport;
use hidapi::HidApi;
use log::{debug, warn};
use std::ffi::CString;

/// Registry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Vendor ID boards are searched under.
    pub vendor_id: u16,
    /// Read policy given to every session opened by the registry.
    pub read_policy: ReadPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            vendor_id: consts::VELLEMAN_VID,
            read_policy: ReadPolicy::default(),
        }
    }
}

/// Owns the transport and one session slot per board address (0-3).
///
/// Slots are independent: each open board can be driven on its own, and
/// closing one never affects the others.
pub struct K8055Registry<T: HidTransport> {
    transport: T,
    config: RegistryConfig,
    slots: [Option<K8055Session<T::Handle>>; consts::MAX_BOARDS],
}

impl K8055Registry<HidApi> {
    /// Creates a registry backed by a fresh `HidApi` instance.
    pub fn with_hidapi() -> Result<Self> {
        Ok(Self::new(HidApi::new()?))
    }
}

impl<T: HidTransport> K8055Registry<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, RegistryConfig::default())
    }

    pub fn with_config(transport: T, config: RegistryConfig) -> Self {
        Self {
            transport,
            config,
            slots: std::array::from_fn(|_| None),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // --- Discovery ---

    /// Lists every connected board, in enumeration order.
    pub fn list_boards(&mut self) -> Result<Vec<BoardInfo>> {
        let entries = self.transport.enumerate(self.config.vendor_id)?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let address = BoardAddress::from_product_id(entry.product_id)?;
                Some(BoardInfo {
                    address,
                    vendor_id: entry.vendor_id,
                    product_id: entry.product_id,
                    path: entry.path,
                    serial_number: entry.serial_number,
                    product_string: entry.product_string,
                })
            })
            .collect())
    }

    /// Returns the set of board addresses currently connected.
    pub fn search_devices(&mut self) -> Result<BoardMask> {
        let mut mask = BoardMask::default();
        for info in self.list_boards()? {
            mask.insert(info.address);
        }
        debug!("Board search found mask 0b{:04b}", mask.bits());
        Ok(mask)
    }

    /// Finds the HID path of the board at `address`.
    /// If several devices claim the address, the first one enumerated wins.
    pub fn resolve(&mut self, address: BoardAddress) -> Result<CString> {
        let product_id = address.product_id();
        let found = self
            .transport
            .enumerate(self.config.vendor_id)?
            .into_iter()
            .find(|entry| entry.product_id == product_id);
        match found {
            Some(entry) => {
                debug!("Board {} resolved to {:?}", address, entry.path);
                Ok(entry.path)
            }
            None => {
                warn!(
                    "No board found for address {} (VID={:04X}, PID={:04X})",
                    address, self.config.vendor_id, product_id
                );
                Err(Error::NoDeviceFound {
                    address,
                    vendor_id: self.config.vendor_id,
                    product_id,
                })
            }
        }
    }

    // --- Sessions ---

    /// Opens the board at `address` and installs its session.
    pub fn open(&mut self, address: BoardAddress) -> Result<&mut K8055Session<T::Handle>> {
        if self.slots[address.index()].is_some() {
            return Err(Error::AlreadyOpen { address });
        }
        let path = self.resolve(address)?;
        let handle = self.transport.open(&path)?;
        let session = K8055Session::open_with_policy(address, handle, self.config.read_policy)?;
        Ok(self.slots[address.index()].insert(session))
    }

    /// Closes the board at `address`. Closing a free slot does nothing.
    pub fn close(&mut self, address: BoardAddress) {
        match self.slots[address.index()].take() {
            Some(session) => session.close(),
            None => debug!("Board {} is not open, nothing to close", address),
        }
    }

    /// Closes every open board.
    pub fn close_all(&mut self) {
        for address in BoardAddress::ALL {
            if self.is_open(address) {
                self.close(address);
            }
        }
    }

    pub fn is_open(&self, address: BoardAddress) -> bool {
        self.slots[address.index()].is_some()
    }

    /// Addresses with an open session.
    pub fn open_boards(&self) -> BoardMask {
        let mut mask = BoardMask::default();
        for address in BoardAddress::ALL {
            if self.is_open(address) {
                mask.insert(address);
            }
        }
        mask
    }

    /// The session at `address`, or `Error::NotOpen`.
    pub fn session(&self, address: BoardAddress) -> Result<&K8055Session<T::Handle>> {
        self.slots[address.index()]
            .as_ref()
            .ok_or(Error::NotOpen { address })
    }

    /// The session at `address` for issuing channel operations, or `Error::NotOpen`.
    pub fn session_mut(&mut self, address: BoardAddress) -> Result<&mut K8055Session<T::Handle>> {
        self.slots[address.index()]
            .as_mut()
            .ok_or(Error::NotOpen { address })
    }
}
