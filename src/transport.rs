//! HID transport seam.
//!
//! The protocol layer only needs six primitives from the host HID stack:
//! enumerate, open, set non-blocking mode, read, write and close. They are
//! expressed as two traits so that sessions can run against real hardware
//! through `hidapi` or against the in-memory [`mock`](crate::mock) backend.

use crate::error::Result;
use hidapi::{HidApi, HidDevice};
use log::{debug, trace};
use std::ffi::{CStr, CString};

/// One HID interface as reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidDeviceEntry {
    pub path: CString,
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
}

/// An open HID device. Dropping the handle closes it.
pub trait HidHandle {
    /// Switches between blocking and non-blocking reads.
    fn set_nonblocking(&self, nonblocking: bool) -> Result<()>;

    /// Reads one input report into `buf`. Returns 0 when a non-blocking read finds no data.
    fn read(&self, buf: &mut [u8]) -> Result<usize>;

    /// Writes one output report. Returns the number of bytes the host stack accepted.
    fn write(&self, data: &[u8]) -> Result<usize>;
}

/// Access to the host's HID devices.
pub trait HidTransport {
    type Handle: HidHandle;

    /// Lists the HID interfaces of one vendor currently visible to the host.
    fn enumerate(&mut self, vendor_id: u16) -> Result<Vec<HidDeviceEntry>>;

    /// Opens a device by its platform-specific path.
    fn open(&self, path: &CStr) -> Result<Self::Handle>;
}

impl HidHandle for HidDevice {
    fn set_nonblocking(&self, nonblocking: bool) -> Result<()> {
        self.set_blocking_mode(!nonblocking)?;
        Ok(())
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        Ok(HidDevice::read(self, buf)?)
    }

    fn write(&self, data: &[u8]) -> Result<usize> {
        Ok(HidDevice::write(self, data)?)
    }
}

impl HidTransport for HidApi {
    type Handle = HidDevice;

    fn enumerate(&mut self, vendor_id: u16) -> Result<Vec<HidDeviceEntry>> {
        // device_list() is a snapshot; refresh so hot-plugged boards show up
        self.refresh_devices()?;
        let entries: Vec<HidDeviceEntry> = self
            .device_list()
            .filter(|info| info.vendor_id() == vendor_id)
            .map(|info| {
                trace!(
                    "Found HID device: VID={:04X}, PID={:04X}, Path={:?}, SN={:?}",
                    info.vendor_id(),
                    info.product_id(),
                    info.path(),
                    info.serial_number()
                );
                HidDeviceEntry {
                    path: info.path().to_owned(),
                    vendor_id: info.vendor_id(),
                    product_id: info.product_id(),
                    serial_number: info.serial_number().map(String::from),
                    product_string: info.product_string().map(String::from),
                }
            })
            .collect();
        debug!(
            "Enumerated {} HID interface(s) with VID={:04X}",
            entries.len(),
            vendor_id
        );
        Ok(entries)
    }

    fn open(&self, path: &CStr) -> Result<HidDevice> {
        Ok(self.open_path(path)?)
    }
}
