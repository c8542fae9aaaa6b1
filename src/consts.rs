//! Internal constants, report layouts, and command codes.

// Default Vendor/Product IDs
/// Velleman vendor ID for K8055/VM110 boards.
pub const VELLEMAN_VID: u16 = 0x10CF;
/// Product ID of board address 0. Boards 1-3 use `K8055_PID_BASE + address`.
pub const K8055_PID_BASE: u16 = 0x5500;

/// Number of board addresses selectable with the SK5/SK6 jumpers.
pub const MAX_BOARDS: usize = 4;

// --- Report sizes ---
/// Size of an input report as returned by hidapi `read()`.
pub const INPUT_REPORT_LEN: usize = 8;
/// Size of the buffer passed to hidapi `write()`, including the leading marker byte.
pub const OUTPUT_REPORT_LEN: usize = 9;
/// First byte of every output report.
pub const OUTPUT_FRAME_MARKER: u8 = 0x01;

// --- Output report (9 bytes) ---
pub mod output {
    pub const CMD: usize = 1;
    pub const DIGITAL: usize = 2;
    pub const ANALOG_1: usize = 3;
    pub const ANALOG_2: usize = 4;
    pub const RESET_COUNTER_1: usize = 5;
    pub const RESET_COUNTER_2: usize = 6;
    pub const DEBOUNCE_1: usize = 7;
    pub const DEBOUNCE_2: usize = 8;

    // Command codes (byte 1)
    pub mod cmd {
        pub const RESET: u8 = 0x00;
        pub const SET_DEBOUNCE_1: u8 = 0x01;
        pub const SET_DEBOUNCE_2: u8 = 0x02;
        pub const RESET_COUNTER_1: u8 = 0x03;
        pub const RESET_COUNTER_2: u8 = 0x04;
        pub const SET_ANALOG_DIGITAL: u8 = 0x05;
    }
}

// --- Input report (8 bytes) ---
pub mod input {
    pub const DIGITAL: usize = 0;
    pub const STATUS: usize = 1;
    pub const ANALOG_1: usize = 2;
    pub const ANALOG_2: usize = 3;
    pub const COUNTER_1: usize = 4;
    pub const COUNTER_2: usize = 6;
}

// --- Debounce curve ---
// Measured: debounce_ms ~= 0.115 * value^2, within +-4% over the whole range.
pub const DEBOUNCE_CURVE_FACTOR: f64 = 0.115;
pub const DEBOUNCE_MAX_MS: i32 = 7450;
