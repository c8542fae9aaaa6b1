//! # k8055-hid
//!
//! A Rust crate for controlling Velleman K8055 / VM110 (and K8055N / VM110N)
//! USB experiment boards via their USB HID interface.
//!
//! This crate uses the `hidapi` crate for cross-platform USB HID communication
//! and replaces the vendor `K8055D.DLL`.
//!
//! ## Features
//!
//! *   Board discovery (`search_devices`, `list_boards`, `resolve`).
//! *   Up to four boards per host, addressed 0-3 (`K8055Registry`).
//! *   Digital outputs 1-8:
//!     *   Single channel set/clear (`set_digital_channel`, `clear_digital_channel`).
//!     *   Whole-port writes (`write_all_digital`, `set_all_digital`, `clear_all_digital`).
//! *   Digital inputs 1-5 (`read_digital_channel`, `read_all_digital`).
//! *   Analog outputs DA1/DA2 and inputs A1/A2 (0-255).
//! *   Pulse counters 1/2: read, reset, debounce time in milliseconds.
//! *   `read_all_values`: every input from a single report.
//! *   A mock backend (`mock`) for tests and hardware-free demos.
//!
//! ## Board Behaviour
//!
//! *   **Output state:** The board has no per-field write. Each session keeps a
//!     shadow copy of the outputs and resends it whenever one field changes.
//! *   **Input reports:** The board answers non-blocking reads with either a
//!     fresh 8-byte report or nothing. "Nothing" is a normal outcome; the
//!     previous values remain valid. Drive reads from your own polling loop
//!     (e.g. every 20-100 ms).
//! *   **Board check:** Each input report echoes the board address (address + 1,
//!     or address + 10 on K8055N firmware). Reports from another board are rejected.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! k8055-hid = "0.1.0" # Replace with the latest version
//! log = "0.4"         # Optional, for logging
//!
//! [dev-dependencies]  # For examples/tests
//! env_logger = "0.11"
//! ```
//!
//! You also need the `hidapi` library installed on your system. See the [`hidapi` crate documentation](https://docs.rs/hidapi/) for details.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use k8055_hid::{AnalogChannel, BoardAddress, Counter, DigitalOutput, K8055Registry, Result};
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     let mut registry = K8055Registry::with_hidapi()?;
//!     let address = BoardAddress::new(0)?;
//!     let board = registry.open(address)?;
//!
//!     board.set_digital_channel(DigitalOutput::new(1)?)?;
//!     board.output_analog_channel(AnalogChannel::One, 128)?;
//!     board.set_counter_debounce_time(Counter::One, 10)?;
//!
//!     let values = board.read_all_values()?;
//!     println!("Inputs: {:?}", values);
//!
//!     registry.close(address);
//!     Ok(())
//! }
//! ```
//!
//! ## Hardware Setup Notes
//!
//! *   **Board address:** Set with jumpers SK5/SK6. The board enumerates with
//!     product ID `0x5500 + address`.
//! *   **Linux udev Rules:** Grant user permission to the HID devices. Create `/etc/udev/rules.d/99-k8055.rules`:
//!     ```udev
//!     # Velleman K8055 / VM110, board addresses 0-3
//!     SUBSYSTEM=="hidraw", ATTRS{idVendor}=="10cf", ATTRS{idProduct}=="550[0-3]", MODE="0666", GROUP="plugdev"
//!     ```
//!     *(Adjust `GROUP` if needed)*. Reload: `sudo udevadm control --reload-rules && sudo udevadm trigger`
//!
//! ## License
//!
//! This project is licensed under the LGPL-2.1-or-later.

// Make internal modules private, re-export public types
mod analog;
mod board;
mod channel;
mod consts;
mod counter;
pub mod debounce;
mod digital;
mod error;
pub mod mock;
mod registry;
pub mod report;
mod session;
pub mod transport;

pub use board::{BoardAddress, BoardInfo, BoardMask, FirmwareVariant};
pub use channel::{AnalogChannel, Counter, DigitalInput, DigitalOutput};
pub use counter::AllValues;
pub use error::{Error, ReadFailureKind, Result};
pub use registry::{K8055Registry, RegistryConfig};
pub use report::{InputSnapshot, OutputCommand, OutputRegister};
pub use session::{K8055Session, ReadPolicy, Refresh};
pub use transport::{HidDeviceEntry, HidHandle, HidTransport};
// Re-export only essential public constants
pub use consts::{K8055_PID_BASE, VELLEMAN_VID};

/// Library version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
