// tests/hardware_tests.rs
//! Tests against a real K8055 board at address 0. Ignored by default.
//! Run with: cargo test --test hardware_tests -- --ignored --test-threads=1
use k8055_hid::{
    AnalogChannel, BoardAddress, Counter, DigitalOutput, K8055Registry, Refresh, Result,
};
use hidapi::HidApi;
use std::{
    thread,
    time::{Duration, Instant},
};

const TEST_BOARD: u8 = 0; // CHANGE THIS to the address set with SK5/SK6

// Helper to open the test board, panics on failure for test simplicity
fn open_test_registry() -> (K8055Registry<HidApi>, BoardAddress) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut registry = K8055Registry::with_hidapi().expect("Failed to create HID API");
    let address = BoardAddress::new(TEST_BOARD).expect("Invalid test board address");
    registry
        .open(address)
        .expect("Failed to open K8055 board. Is it connected and permissions set?");
    (registry, address)
}

// The board sends a report every few ms; poll until one arrives
fn wait_for_report(registry: &mut K8055Registry<HidApi>, address: BoardAddress) -> Result<()> {
    let board = registry.session_mut(address)?;
    for _ in 0..50 {
        if board.refresh_input()? == Refresh::Updated {
            return Ok(());
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("No input report received within 500 ms");
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_board_is_found() -> Result<()> {
    let mut registry = K8055Registry::with_hidapi()?;
    let mask = registry.search_devices()?;
    println!("Boards found: 0b{:04b}", mask.bits());
    assert!(mask.contains(BoardAddress::new(TEST_BOARD)?));
    Ok(())
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_digital_output_walk() -> Result<()> {
    let (mut registry, address) = open_test_registry();
    let board = registry.session_mut(address)?;

    println!("Walking digital outputs 1-8 (watch the LEDs)");
    for n in 1..=8 {
        board.set_digital_channel(DigitalOutput::new(n)?)?;
        thread::sleep(Duration::from_millis(100));
    }
    assert_eq!(board.output_register().digital, 0xFF);
    for n in 1..=8 {
        board.clear_digital_channel(DigitalOutput::new(n)?)?;
        thread::sleep(Duration::from_millis(100));
    }
    assert_eq!(board.output_register().digital, 0x00);

    registry.close(address);
    Ok(())
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_analog_outputs_and_inputs() -> Result<()> {
    let (mut registry, address) = open_test_registry();
    {
        let board = registry.session_mut(address)?;
        board.output_analog_channel(AnalogChannel::One, 0x80)?;
        board.output_analog_channel(AnalogChannel::Two, 0x40)?;
    }
    wait_for_report(&mut registry, address)?;

    let board = registry.session_mut(address)?;
    let (a1, a2) = board.read_all_analog()?;
    println!("Analog inputs: A1={} A2={}", a1, a2);

    board.clear_all_analog()?;
    registry.close(address);
    Ok(())
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_counter_reset_and_debounce() -> Result<()> {
    let (mut registry, address) = open_test_registry();
    {
        let board = registry.session_mut(address)?;
        board.set_counter_debounce_time(Counter::One, 2)?;
        board.set_counter_debounce_time(Counter::Two, 2)?;
        board.reset_counter(Counter::One)?;
        board.reset_counter(Counter::Two)?;
    }
    wait_for_report(&mut registry, address)?;

    // Reports queued before the reset still carry the old counts; keep
    // polling until the reset shows up or the deadline passes
    let board = registry.session_mut(address)?;
    let deadline = Instant::now() + Duration::from_millis(1000);
    let mut values = board.read_all_values()?;
    while (values.counter1 != 0 || values.counter2 != 0) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
        values = board.read_all_values()?;
    }
    println!("After reset: {:?}", values);
    assert_eq!(values.counter1, 0, "Counter 1 should read 0 after reset (no pulses on I1)");
    assert_eq!(values.counter2, 0, "Counter 2 should read 0 after reset (no pulses on I2)");

    registry.close(address);
    Ok(())
}
