use k8055_hid::{AnalogChannel, K8055Registry};
use std::error::Error;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let mut registry = K8055Registry::with_hidapi()?;

    // --- Find all connected boards ---
    println!(
        "Searching for K8055 boards (VID=0x{:04X}, PID=0x{:04X}-0x{:04X})...",
        k8055_hid::VELLEMAN_VID,
        k8055_hid::K8055_PID_BASE,
        k8055_hid::K8055_PID_BASE + 3
    );
    let boards = registry.list_boards()?;

    if boards.is_empty() {
        println!("No boards found.");
        return Ok(());
    }

    println!("Found {} board(s):", boards.len());
    for (i, info) in boards.iter().enumerate() {
        println!(
            "  {}: Address={}, PID=0x{:04X}, Path={:?}, Serial='{}', Product='{}'",
            i,
            info.address,
            info.product_id,
            info.path,
            info.serial_number.as_deref().unwrap_or("N/A"),
            info.product_string.as_deref().unwrap_or("N/A"),
        );
    }

    // --- Select board ---
    let selected = if boards.len() == 1 {
        println!("Automatically selecting the only board found.");
        &boards[0]
    } else {
        loop {
            print!(
                "Enter the number of the board to open (0-{}): ",
                boards.len() - 1
            );
            io::stdout().flush()?;
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            match input.trim().parse::<usize>() {
                Ok(index) if index < boards.len() => break &boards[index],
                _ => println!(
                    "Invalid input. Please enter a number between 0 and {}.",
                    boards.len() - 1
                ),
            }
        }
    };

    // --- Open selected board ---
    let address = selected.address;
    println!("Opening board {}...", address);
    let board = match registry.open(address) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error opening board {}: {}", address, e);
            return Err(e.into());
        }
    };
    println!("Successfully opened board {}!", board.address());

    // --- Show what the board reports ---
    let values = board.read_all_values()?;
    println!(
        "Inputs: digital=0b{:05b}, A1={}, A2={}, C1={}, C2={}",
        values.digital, values.analog1, values.analog2, values.counter1, values.counter2
    );
    println!(
        "Analog 1 reads {} (0-255)",
        board.read_analog_channel(AnalogChannel::One)?
    );

    registry.close(address);
    println!("Board closed.");
    Ok(())
}
