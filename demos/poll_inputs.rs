use k8055_hid::{
    debounce, AnalogChannel, BoardAddress, Counter, K8055Registry, ReadPolicy, RegistryConfig,
    Result,
};
use std::{thread, time::Duration};

const BOARD: u8 = 0;
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const DEBOUNCE_MS: i32 = 10;

fn main() -> Result<()> {
    env_logger::init();
    let config = RegistryConfig {
        read_policy: ReadPolicy::with_attempts(3),
        ..RegistryConfig::default()
    };
    let mut registry = K8055Registry::with_config(hidapi::HidApi::new()?, config);
    let address = BoardAddress::new(BOARD)?;

    let mask = registry.search_devices()?;
    if !mask.contains(address) {
        eprintln!("Board {} not connected (found mask 0b{:04b}).", address, mask.bits());
        return Ok(());
    }

    let board = registry.open(address)?;
    let hw = debounce::to_hardware_byte(DEBOUNCE_MS)?;
    println!(
        "Counter debounce {} ms -> hardware byte {} (~{:.1} ms)",
        DEBOUNCE_MS,
        hw,
        debounce::byte_to_millis(hw)
    );
    board.set_counter_debounce_time(Counter::One, DEBOUNCE_MS)?;
    board.set_counter_debounce_time(Counter::Two, DEBOUNCE_MS)?;
    board.reset_counter(Counter::One)?;
    board.reset_counter(Counter::Two)?;

    println!("Polling board {} inputs (Press Ctrl+C to stop)", address);
    loop {
        match board.read_all_values() {
            Ok(values) => {
                println!(
                    "I1-I5: {:05b}  A1: {:3}  A2: {:3}  C1: {:5}  C2: {:5}",
                    values.digital,
                    values.analog1,
                    values.analog2,
                    values.counter1,
                    values.counter2
                );
                // Mirror analog input 1 onto analog output 1
                board.output_analog_channel(AnalogChannel::One, values.analog1)?;
            }
            Err(e) => eprintln!("Read failed, keeping previous values: {}", e),
        }
        thread::sleep(POLL_INTERVAL);
    }
}
