use k8055_hid::{BoardAddress, DigitalOutput, K8055Registry, Result};
use std::{thread, time::Duration};

// Board address selected with jumpers SK5/SK6
const BOARD: u8 = 0;

fn main() -> Result<()> {
    env_logger::init();
    let mut registry = K8055Registry::with_hidapi()?;
    let address = BoardAddress::new(BOARD)?;

    println!("Opening K8055 board {}...", address);
    let board = registry.open(address)?;
    println!("Board opened.");

    let outputs = (1..=8)
        .map(DigitalOutput::new)
        .collect::<Result<Vec<_>>>()?;

    println!("Running light on outputs 1-8 (Press Ctrl+C to stop)");
    loop {
        for &output in &outputs {
            board.set_digital_channel(output)?;
            thread::sleep(Duration::from_millis(120));
            board.clear_digital_channel(output)?;
        }
    }
    // Note: Loop runs forever, outputs keep their last state after Ctrl+C
}
