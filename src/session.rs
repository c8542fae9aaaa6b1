//! An open K8055 board: transport handle, shadow output register and last input snapshot.

use crate::board::BoardAddress;
use crate::consts;
use crate::error::{Error, ReadFailureKind, Result};
use crate::report::{encode_output, InputSnapshot, OutputCommand, OutputRegister};
use crate::transport::HidHandle;
use log::{debug, trace, warn};
use std::num::NonZeroU8;

/// How many non-blocking reads `refresh_input` may issue before reporting a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPolicy {
    /// Reads attempted while the board keeps returning malformed or foreign
    /// reports. A valid or empty read always ends the attempt sequence.
    pub attempts: NonZeroU8,
}

impl ReadPolicy {
    /// One read per call; retry cadence is left to the caller's poll loop.
    pub const SINGLE_ATTEMPT: ReadPolicy = ReadPolicy {
        attempts: NonZeroU8::MIN,
    };

    /// Allows up to `attempts` reads per call (minimum 1).
    pub fn with_attempts(attempts: u8) -> Self {
        ReadPolicy {
            attempts: NonZeroU8::new(attempts).unwrap_or(NonZeroU8::MIN),
        }
    }
}

impl Default for ReadPolicy {
    fn default() -> Self {
        Self::SINGLE_ATTEMPT
    }
}

/// Result of a successful [`K8055Session::refresh_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// A new report was decoded into the snapshot.
    Updated,
    /// The board had nothing new; the previous snapshot stands.
    Unchanged,
}

/// A handle to one opened K8055 board.
///
/// Output operations mutate a host-side copy of the board's output state and
/// retransmit it; input operations issue one read and answer from the
/// resulting snapshot. All methods take `&mut self`: sharing a session across
/// threads needs a lock around the whole session.
#[derive(Debug)]
pub struct K8055Session<H: HidHandle> {
    handle: H,
    address: BoardAddress,
    output: OutputRegister,
    input: InputSnapshot,
    has_input: bool,
    read_policy: ReadPolicy,
}

impl<H: HidHandle> K8055Session<H> {
    /// Binds a session to an already opened handle of the board at `address`
    /// and puts the handle into non-blocking mode.
    pub fn open(address: BoardAddress, handle: H) -> Result<Self> {
        Self::open_with_policy(address, handle, ReadPolicy::default())
    }

    /// Like [`open`](Self::open), with an explicit read policy.
    pub fn open_with_policy(address: BoardAddress, handle: H, read_policy: ReadPolicy) -> Result<Self> {
        handle.set_nonblocking(true)?;
        debug!(
            "Opened K8055 board {} (PID={:04X}), read attempts={}",
            address,
            address.product_id(),
            read_policy.attempts
        );
        Ok(Self {
            handle,
            address,
            output: OutputRegister::default(),
            input: InputSnapshot::default(),
            has_input: false,
            read_policy,
        })
    }

    /// Closes the session, releasing the transport handle.
    pub fn close(self) {
        debug!("Closing K8055 board {}", self.address);
    }

    /// Board address this session talks to.
    pub fn address(&self) -> BoardAddress {
        self.address
    }

    /// Current shadow output register.
    pub fn output_register(&self) -> &OutputRegister {
        &self.output
    }

    /// Last good input snapshot (all zero until the first successful read).
    pub fn input_snapshot(&self) -> &InputSnapshot {
        &self.input
    }

    /// Whether at least one input report has been decoded.
    pub fn has_input(&self) -> bool {
        self.has_input
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    pub fn set_read_policy(&mut self, read_policy: ReadPolicy) {
        self.read_policy = read_policy;
    }

    // --- Input ---

    /// Reads the board's input report into the snapshot.
    ///
    /// An empty read is not an error: the board only reports when it has
    /// something new, and the previous snapshot stays valid. A report of the
    /// wrong size or from another board yields `Error::ReadFailure` and leaves
    /// the snapshot untouched.
    pub fn refresh_input(&mut self) -> Result<Refresh> {
        let attempts = self.read_policy.attempts.get();
        let mut attempt = 1;
        loop {
            match self.read_once() {
                Err(Error::ReadFailure { .. }) if attempt < attempts => {
                    trace!(
                        "Board {}: read attempt {}/{} rejected, retrying",
                        self.address,
                        attempt,
                        attempts
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    fn read_once(&mut self) -> Result<Refresh> {
        // One spare byte so an oversized report is detected instead of truncated
        let mut buf = [0u8; consts::INPUT_REPORT_LEN + 1];
        let len = self.handle.read(&mut buf)?;
        match len {
            0 => {
                trace!("Board {}: no new input report", self.address);
                Ok(Refresh::Unchanged)
            }
            consts::INPUT_REPORT_LEN => {
                let mut report = [0u8; consts::INPUT_REPORT_LEN];
                report.copy_from_slice(&buf[..consts::INPUT_REPORT_LEN]);
                trace!("Board {} IN Report: {:02X?}", self.address, &report[..]);
                let status = report[consts::input::STATUS];
                if self.address.match_status(status).is_none() {
                    warn!(
                        "Board {}: input report status 0x{:02X} does not match address",
                        self.address, status
                    );
                    return Err(Error::ReadFailure {
                        address: self.address,
                        kind: ReadFailureKind::StatusMismatch(status),
                    });
                }
                self.input = InputSnapshot::decode(&report);
                self.has_input = true;
                Ok(Refresh::Updated)
            }
            other => {
                warn!(
                    "Board {}: received input report of {} bytes (expected {})",
                    self.address,
                    other,
                    consts::INPUT_REPORT_LEN
                );
                Err(Error::ReadFailure {
                    address: self.address,
                    kind: ReadFailureKind::UnexpectedLength(other),
                })
            }
        }
    }

    /// Refreshes and returns a copy of the snapshot, so every field comes from the same read.
    pub(crate) fn refreshed_snapshot(&mut self) -> Result<InputSnapshot> {
        self.refresh_input()?;
        Ok(self.input)
    }

    // --- Output ---

    /// Applies `mutate` to a copy of the output register and sends it with
    /// `command`. The shadow register is only updated once the board has
    /// accepted the full report.
    pub fn apply_output<F>(&mut self, command: OutputCommand, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut OutputRegister),
    {
        let mut next = self.output;
        mutate(&mut next);
        self.write_report(command, &next)?;
        if next != self.output {
            debug!(
                "Board {} output register: {:?} -> {:?}",
                self.address, self.output, next
            );
        }
        self.output = next;
        Ok(())
    }

    fn write_report(&self, command: OutputCommand, register: &OutputRegister) -> Result<()> {
        let buf = encode_output(command, register);
        trace!(
            "Board {} OUT Report ({:?}): {:02X?}",
            self.address,
            command,
            &buf[..]
        );
        let written = self.handle.write(&buf)?;
        if written != buf.len() {
            warn!(
                "Board {}: hidapi write returned unexpected length: {} (expected {})",
                self.address,
                written,
                buf.len()
            );
            return Err(Error::WriteFailure {
                address: self.address,
                expected: buf.len(),
                actual: written,
            });
        }
        Ok(())
    }

    /// Sends the reset command (command 0) with the current register. The register is not changed.
    pub fn send_reset(&mut self) -> Result<()> {
        self.apply_output(OutputCommand::Reset, |_| {})
    }
}
