//! In-memory HID backend for tests and demos without hardware.
//!
//! A [`MockBoard`] is a cheap, clonable handle to the shared state of one
//! simulated board: queued input reports, the history of output reports,
//! and whether a handle to it is currently open.

use crate::board::{BoardAddress, FirmwareVariant};
use crate::consts;
use crate::error::Result;
use crate::transport::{HidDeviceEntry, HidHandle, HidTransport};
use hidapi::HidError;
use std::collections::VecDeque;
use std::ffi::{CStr, CString};
use std::sync::{Arc, Mutex, MutexGuard};

/// One scripted outcome of a `read()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRead {
    /// Return these bytes (any length, to simulate malformed reports).
    Report(Vec<u8>),
    /// Return 0 bytes, as a non-blocking read does when nothing is pending.
    Empty,
    /// Fail with a HID error.
    Error,
}

#[derive(Debug, Default)]
struct MockBoardState {
    reads: VecDeque<MockRead>,
    writes: Vec<Vec<u8>>,
    write_limit: Option<usize>,
    nonblocking: bool,
    open_handles: usize,
}

/// A simulated board.
#[derive(Debug, Clone)]
pub struct MockBoard {
    entry: HidDeviceEntry,
    address: Option<BoardAddress>,
    state: Arc<Mutex<MockBoardState>>,
}

impl MockBoard {
    /// Creates a board that enumerates as a K8055 with the given address.
    pub fn new(address: BoardAddress) -> Self {
        let mut board = Self::with_ids(consts::VELLEMAN_VID, address.product_id());
        board.address = Some(address);
        board
    }

    /// Creates a device with arbitrary IDs, e.g. an unrelated HID device.
    pub fn with_ids(vendor_id: u16, product_id: u16) -> Self {
        let path = format!("mock://{:04x}:{:04x}", vendor_id, product_id);
        MockBoard {
            entry: HidDeviceEntry {
                path: CString::new(path).unwrap_or_default(),
                vendor_id,
                product_id,
                serial_number: None,
                product_string: Some("USB K8055 Simulator".to_string()),
            },
            address: None,
            state: Arc::new(Mutex::new(MockBoardState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockBoardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Enumeration entry of this board.
    pub fn entry(&self) -> &HidDeviceEntry {
        &self.entry
    }

    /// Builds an 8-byte input report for this board's address as original K8055 firmware sends it.
    /// `wire_digital` is the raw byte 0 (see [`decode_digital`](crate::report::decode_digital)).
    pub fn input_report(
        &self,
        wire_digital: u8,
        analog1: u8,
        analog2: u8,
        counter1: u16,
        counter2: u16,
    ) -> Vec<u8> {
        let status = self
            .address
            .map(|a| FirmwareVariant::K8055.status_byte(a))
            .unwrap_or(0);
        let c1 = counter1.to_le_bytes();
        let c2 = counter2.to_le_bytes();
        vec![
            wire_digital,
            status,
            analog1,
            analog2,
            c1[0],
            c1[1],
            c2[0],
            c2[1],
        ]
    }

    /// Queues a raw read result.
    pub fn queue_read(&self, read: MockRead) {
        self.lock().reads.push_back(read);
    }

    /// Queues raw report bytes.
    pub fn queue_report(&self, report: impl Into<Vec<u8>>) {
        self.queue_read(MockRead::Report(report.into()));
    }

    /// Number of scripted reads not yet consumed.
    pub fn pending_reads(&self) -> usize {
        self.lock().reads.len()
    }

    /// Every output report written so far.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.lock().writes.clone()
    }

    /// The most recent output report.
    pub fn last_write(&self) -> Option<Vec<u8>> {
        self.lock().writes.last().cloned()
    }

    /// Caps the byte count `write()` reports, to simulate short writes. `None` restores full writes.
    pub fn set_write_limit(&self, limit: Option<usize>) {
        self.lock().write_limit = limit;
    }

    /// Whether a handle to this board is currently open.
    pub fn is_open(&self) -> bool {
        self.lock().open_handles > 0
    }

    /// Whether the last opened handle was switched to non-blocking mode.
    pub fn is_nonblocking(&self) -> bool {
        self.lock().nonblocking
    }
}

/// Open handle to a [`MockBoard`].
#[derive(Debug)]
pub struct MockHandle {
    board: MockBoard,
}

impl HidHandle for MockHandle {
    fn set_nonblocking(&self, nonblocking: bool) -> Result<()> {
        self.board.lock().nonblocking = nonblocking;
        Ok(())
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        match self.board.lock().reads.pop_front() {
            None | Some(MockRead::Empty) => Ok(0),
            Some(MockRead::Report(bytes)) => {
                let len = bytes.len().min(buf.len());
                buf[..len].copy_from_slice(&bytes[..len]);
                Ok(len)
            }
            Some(MockRead::Error) => Err(HidError::HidApiError {
                message: "simulated read error".to_string(),
            }
            .into()),
        }
    }

    fn write(&self, data: &[u8]) -> Result<usize> {
        let mut state = self.board.lock();
        state.writes.push(data.to_vec());
        Ok(state.write_limit.map_or(data.len(), |limit| limit.min(data.len())))
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        let mut state = self.board.lock();
        state.open_handles = state.open_handles.saturating_sub(1);
    }
}

/// A simulated host with any number of attached boards.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    boards: Vec<MockBoard>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a board. Returns a handle sharing the board's state.
    pub fn attach(&mut self, board: MockBoard) -> MockBoard {
        self.boards.push(board.clone());
        board
    }

    /// Attaches a K8055 with the given address.
    pub fn attach_board(&mut self, address: BoardAddress) -> MockBoard {
        self.attach(MockBoard::new(address))
    }

    /// Removes every board with this product ID, as if it was unplugged.
    pub fn detach(&mut self, product_id: u16) {
        self.boards.retain(|b| b.entry.product_id != product_id);
    }
}

impl HidTransport for MockTransport {
    type Handle = MockHandle;

    fn enumerate(&mut self, vendor_id: u16) -> Result<Vec<HidDeviceEntry>> {
        Ok(self
            .boards
            .iter()
            .filter(|b| b.entry.vendor_id == vendor_id)
            .map(|b| b.entry.clone())
            .collect())
    }

    fn open(&self, path: &CStr) -> Result<MockHandle> {
        let board = self
            .boards
            .iter()
            .find(|b| b.entry.path.as_c_str() == path)
            .ok_or_else(|| HidError::HidApiError {
                message: format!("no mock device at {:?}", path),
            })?;
        board.lock().open_handles += 1;
        Ok(MockHandle {
            board: board.clone(),
        })
    }
}
