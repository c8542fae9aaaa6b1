//! Unit tests for the shadow output register
//!
//! These tests verify, against the mock backend, that every output operation
//! retransmits the complete register and never loses previously set fields.

use k8055_hid::mock::{MockBoard, MockHandle, MockTransport};
use k8055_hid::{
    AnalogChannel, BoardAddress, Counter, DigitalOutput, Error, HidTransport, K8055Session,
    OutputRegister,
};

const DIGITAL_BYTE: usize = 2;
const ANALOG_1_BYTE: usize = 3;
const ANALOG_2_BYTE: usize = 4;

fn open_session() -> (K8055Session<MockHandle>, MockBoard) {
    let address = BoardAddress::new(0).unwrap();
    let mut transport = MockTransport::new();
    let board = transport.attach_board(address);
    let handle = transport.open(&board.entry().path).unwrap();
    let session = K8055Session::open(address, handle).unwrap();
    (session, board)
}

fn ch(n: u8) -> DigitalOutput {
    DigitalOutput::new(n).unwrap()
}

#[test]
fn test_open_switches_to_nonblocking() {
    let (session, board) = open_session();
    assert!(board.is_nonblocking());
    assert_eq!(*session.output_register(), OutputRegister::default());
    assert!(board.writes().is_empty());
}

#[test]
fn test_set_then_clear_keeps_other_channels() {
    let (mut session, board) = open_session();

    session.set_digital_channel(ch(3)).unwrap();
    session.clear_digital_channel(ch(5)).unwrap();

    let last = board.last_write().unwrap();
    assert_eq!(last[0], 0x01);
    assert_eq!(last[1], 0x05, "digital changes use SetAnalogDigital");
    assert_eq!(last[DIGITAL_BYTE], 0b0000_0100);
    assert_eq!(session.output_register().digital, 0b0000_0100);
}

#[test]
fn test_digital_channels_accumulate() {
    let (mut session, board) = open_session();

    for n in [1, 4, 8] {
        session.set_digital_channel(ch(n)).unwrap();
    }
    assert_eq!(board.last_write().unwrap()[DIGITAL_BYTE], 0b1000_1001);

    session.clear_digital_channel(ch(4)).unwrap();
    assert_eq!(board.last_write().unwrap()[DIGITAL_BYTE], 0b1000_0001);

    session.set_all_digital().unwrap();
    assert_eq!(board.last_write().unwrap()[DIGITAL_BYTE], 0xFF);

    session.clear_all_digital().unwrap();
    assert_eq!(board.last_write().unwrap()[DIGITAL_BYTE], 0x00);

    session.write_all_digital(0x5A).unwrap();
    assert_eq!(board.last_write().unwrap()[DIGITAL_BYTE], 0x5A);
    assert_eq!(board.writes().len(), 7);
}

#[test]
fn test_analog_write_retransmits_digital_state() {
    let (mut session, board) = open_session();

    session.write_all_digital(0b1010_1010).unwrap();
    session
        .output_analog_channel(AnalogChannel::Two, 200)
        .unwrap();
    let last = board.last_write().unwrap();
    assert_eq!(last[DIGITAL_BYTE], 0b1010_1010);
    assert_eq!(last[ANALOG_1_BYTE], 0);
    assert_eq!(last[ANALOG_2_BYTE], 200);

    session.set_analog_channel(AnalogChannel::One).unwrap();
    let last = board.last_write().unwrap();
    assert_eq!(
        &last[DIGITAL_BYTE..=ANALOG_2_BYTE],
        &[0b1010_1010, 0xFF, 200]
    );

    session.clear_analog_channel(AnalogChannel::Two).unwrap();
    assert_eq!(board.last_write().unwrap()[ANALOG_2_BYTE], 0);
    assert_eq!(board.last_write().unwrap()[ANALOG_1_BYTE], 0xFF);
}

#[test]
fn test_all_analog_operations() {
    let (mut session, board) = open_session();

    session.output_all_analog(10, 20).unwrap();
    assert_eq!(&board.last_write().unwrap()[ANALOG_1_BYTE..=ANALOG_2_BYTE], &[10, 20]);

    session.set_all_analog().unwrap();
    assert_eq!(&board.last_write().unwrap()[ANALOG_1_BYTE..=ANALOG_2_BYTE], &[0xFF, 0xFF]);

    session.clear_all_analog().unwrap();
    assert_eq!(&board.last_write().unwrap()[ANALOG_1_BYTE..=ANALOG_2_BYTE], &[0, 0]);

    session.set_all_values(0x0F, 1, 2).unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x05, 0x0F, 1, 2, 0, 0, 0, 0]
    );
}

#[test]
fn test_counter_reset_leaves_outputs_alone() {
    let (mut session, board) = open_session();
    session.set_all_values(0xC3, 7, 9).unwrap();

    session.reset_counter(Counter::One).unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x03, 0xC3, 7, 9, 0, 0, 0, 0]
    );
    session.reset_counter(Counter::Two).unwrap();
    assert_eq!(board.last_write().unwrap()[1], 0x04);

    // Register still holds the outputs for the next SetAnalogDigital
    let reg = session.output_register();
    assert_eq!((reg.digital, reg.analog1, reg.analog2), (0xC3, 7, 9));
    session.set_digital_channel(ch(3)).unwrap();
    assert_eq!(
        &board.last_write().unwrap()[DIGITAL_BYTE..=ANALOG_2_BYTE],
        &[0xC7, 7, 9]
    );
}

#[test]
fn test_debounce_uses_dedicated_command() {
    let (mut session, board) = open_session();

    session.set_counter_debounce_time(Counter::One, 1000).unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x01, 0, 0, 0, 0, 0, 93, 0]
    );

    session.set_counter_debounce_time(Counter::Two, 99_999).unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x02, 0, 0, 0, 0, 0, 93, 255]
    );

    let reg = session.output_register();
    assert_eq!((reg.debounce1, reg.debounce2), (93, 255));
}

#[test]
fn test_debounce_survives_output_changes() {
    let (mut session, board) = open_session();
    session.set_counter_debounce_time(Counter::One, 2).unwrap();
    session.set_counter_debounce_time(Counter::Two, 10).unwrap();

    session.set_digital_channel(ch(1)).unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x05, 0x01, 0, 0, 0, 0, 4, 9]
    );
    session.output_analog_channel(AnalogChannel::One, 50).unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x05, 0x01, 50, 0, 0, 0, 4, 9]
    );
    session.reset_counter(Counter::Two).unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x04, 0x01, 50, 0, 0, 0, 4, 9]
    );
}

#[test]
fn test_negative_debounce_performs_no_io() {
    let (mut session, board) = open_session();
    let result = session.set_counter_debounce_time(Counter::One, -5);
    assert!(matches!(result, Err(Error::OutOfRange(_))));
    assert!(board.writes().is_empty());
}

#[test]
fn test_short_write_is_reported_and_not_committed() {
    let (mut session, board) = open_session();
    session.set_digital_channel(ch(1)).unwrap();

    board.set_write_limit(Some(4));
    match session.set_digital_channel(ch(2)) {
        Err(Error::WriteFailure {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 9);
            assert_eq!(actual, 4);
        }
        other => panic!("Expected WriteFailure, got: {:?}", other),
    }
    assert_eq!(session.output_register().digital, 0b01);

    // A retry after the glitch sends the intended state
    board.set_write_limit(None);
    session.set_digital_channel(ch(2)).unwrap();
    assert_eq!(board.last_write().unwrap()[DIGITAL_BYTE], 0b11);
}

#[test]
fn test_reset_command_resends_register() {
    let (mut session, board) = open_session();
    session.set_all_values(0xFF, 0xFF, 0xFF).unwrap();
    session.send_reset().unwrap();
    assert_eq!(
        board.last_write().unwrap(),
        vec![0x01, 0x00, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]
    );
    assert_eq!(session.output_register().digital, 0xFF);
}

#[test]
fn test_out_of_range_channels_rejected_before_io() {
    assert!(matches!(
        DigitalOutput::new(0),
        Err(Error::ChannelOutOfRange { channel: 0, .. })
    ));
    assert!(matches!(
        DigitalOutput::new(9),
        Err(Error::ChannelOutOfRange { channel: 9, .. })
    ));
    assert!(AnalogChannel::new(3).is_err());
    assert!(Counter::new(0).is_err());
}
