//! Integration tests: notification → ShowController → indicator → line.

use doorlights::app::events::ShowEvent;
use doorlights::indicator::IndicatorState;
use doorlights::notification::{DoorReport, Notification};
use doorlights::pins::{BACK_DOOR_LED, DOORS, FRONT_DOOR_LED, GARAGE_DOOR_LED, UNKNOWN_DOOR_LED};
use doorlights::show::ShowController;
use doorlights::timing::Timestamp;

use super::mock_hw::{MockBoard, MockLine, RecordingSink};

const T0: Timestamp = Timestamp::from_secs(10);

fn setup() -> (ShowController<MockLine>, MockBoard) {
    let mut board = MockBoard::new();
    let show = ShowController::from_table(&DOORS, T0, |line| board.open(line)).unwrap();
    (show, board)
}

fn topic(id: &str) -> String {
    format!("rtl_433/pi/devices/Contact/{id}/closed")
}

#[test]
fn claims_every_line_once() {
    let (_show, board) = setup();
    assert_eq!(board.claimed(), DOORS.len());
    for door in &DOORS {
        assert!(board.line(door.line).writes().is_empty());
    }
}

#[test]
fn open_door_lights_steadily() {
    let (show, board) = setup();
    let mut sink = RecordingSink::default();
    let t = topic("2898343");

    show.ingest(&Notification::new(&t, b"0"), T0.plus_millis(10), &mut sink);
    show.refresh(T0.plus_millis(100));
    show.refresh(T0.plus_millis(200));
    show.refresh(T0.plus_millis(60_000));

    assert_eq!(board.line(FRONT_DOOR_LED).writes(), vec![true]);
    assert_eq!(
        sink.events,
        vec![ShowEvent::DoorReported {
            name: "Front Door",
            report: DoorReport {
                entity_id: Some(2_898_343),
                is_open: true,
            },
            line: FRONT_DOOR_LED,
            state: IndicatorState::On,
        }]
    );
}

#[test]
fn closed_door_blinks_then_goes_dark() {
    let (show, board) = setup();
    let mut sink = RecordingSink::default();
    let t = topic("2651912");

    // Open, then closed again one second later.
    show.ingest(&Notification::new(&t, b"0"), T0, &mut sink);
    show.refresh(T0.plus_millis(100));
    show.ingest(&Notification::new(&t, b"1"), T0.plus_millis(1_000), &mut sink);

    let garage = show.indicator(GARAGE_DOOR_LED).unwrap();
    assert_eq!(garage.state(), IndicatorState::Blinking);

    let mut ms = 1_100;
    while ms < 31_000 {
        show.refresh(T0.plus_millis(ms));
        ms += 100;
    }
    assert_eq!(garage.state(), IndicatorState::Blinking);

    show.refresh(T0.plus_millis(31_000));
    assert_eq!(garage.state(), IndicatorState::Off);
    show.refresh(T0.plus_millis(31_100));
    assert!(!board.line(GARAGE_DOOR_LED).level());
    assert!(!garage.snapshot().level);
}

#[test]
fn blink_toggles_every_other_tick() {
    let (show, board) = setup();
    for i in 1..=10 {
        show.refresh(T0.plus_millis(i * 100));
    }
    assert_eq!(
        board.line(BACK_DOOR_LED).writes(),
        vec![true, false, true, false, true]
    );
}

#[test]
fn unregistered_sensor_drives_fallback_line() {
    let (show, board) = setup();
    let mut sink = RecordingSink::default();
    let t = topic("999999");

    show.ingest(&Notification::new(&t, b"0"), T0, &mut sink);
    show.refresh(T0.plus_millis(100));

    assert!(board.line(UNKNOWN_DOOR_LED).level());
    assert_eq!(show.stats().fallback, 1);
    match &sink.events[0] {
        ShowEvent::DoorReported { name, report, .. } => {
            assert_eq!(*name, "Unknown");
            assert_eq!(report.entity_id, Some(999_999));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn repeated_closed_report_keeps_blink_deadline() {
    let (show, _board) = setup();
    let mut sink = RecordingSink::default();
    let t = topic("2959527");

    // Blinking since T0; a repeat report must not extend it.
    show.ingest(&Notification::new(&t, b"1"), T0.plus_millis(20_000), &mut sink);
    let back = show.indicator(BACK_DOOR_LED).unwrap();
    assert_eq!(back.snapshot().state_entered_at, T0);

    show.refresh(T0.plus_millis(30_000));
    assert_eq!(back.state(), IndicatorState::Off);
}

#[test]
fn unrelated_traffic_changes_nothing() {
    let (show, board) = setup();
    let mut sink = RecordingSink::default();
    for t in [
        "rtl_433/pi/devices/Contact/2898343/battery_ok",
        "rtl_433/pi/events",
        "homeassistant/status",
    ] {
        assert_eq!(show.ingest(&Notification::new(t, b"0"), T0, &mut sink), None);
    }
    assert!(sink.events.is_empty());
    assert!(show.indicators().all(|i| i.state() == IndicatorState::Blinking));
    assert!(board.line(FRONT_DOOR_LED).writes().is_empty());
    assert_eq!(show.stats().discarded, 3);
}

#[test]
fn release_darkens_every_line() {
    let (show, board) = setup();
    let mut sink = RecordingSink::default();
    let t = topic("2898343");
    show.ingest(&Notification::new(&t, b"0"), T0, &mut sink);
    show.refresh(T0.plus_millis(200));

    show.release(&mut sink);

    for door in &DOORS {
        assert!(!board.line(door.line).level(), "{} still lit", door.display_name);
    }
    assert_eq!(sink.events.last(), Some(&ShowEvent::Released));
}

#[test]
fn wide_sensor_id_is_reported_intact() {
    let (show, _board) = setup();
    let mut sink = RecordingSink::default();
    let t = topic("12345678901");

    show.ingest(&Notification::new(&t, b"1"), T0, &mut sink);

    match &sink.events[0] {
        ShowEvent::DoorReported { name, report, line, .. } => {
            assert_eq!(*name, "Unknown");
            assert_eq!(report.entity_id, Some(12_345_678_901));
            assert_eq!(report.label(), "closed");
            assert_eq!(*line, UNKNOWN_DOOR_LED);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
