//! Notification and refresh threads hammering the same controller.

use std::thread;

use doorlights::indicator::IndicatorState;
use doorlights::notification::Notification;
use doorlights::pins::{DOORS, FRONT_DOOR_LED, GARAGE_DOOR_LED};
use doorlights::show::ShowController;
use doorlights::timing::Timestamp;

use super::mock_hw::{MockBoard, RecordingSink};

const FRONT: &str = "rtl_433/pi/devices/Contact/2898343/closed";
const GARAGE: &str = "rtl_433/pi/devices/Contact/2651912/closed";

#[test]
fn committed_level_matches_physical_line() {
    let mut board = MockBoard::new();
    let show = ShowController::from_table(&DOORS, Timestamp::ZERO, |l| board.open(l)).unwrap();

    thread::scope(|s| {
        for worker in 0..4u64 {
            let show = &show;
            s.spawn(move || {
                let mut sink = RecordingSink::default();
                for i in 0..500u64 {
                    let payload: &[u8] = if (i + worker) % 3 == 0 { b"1" } else { b"0" };
                    let topic = if i % 2 == 0 { FRONT } else { GARAGE };
                    show.ingest(
                        &Notification::new(topic, payload),
                        Timestamp::from_millis(i * 7),
                        &mut sink,
                    );
                }
                assert_eq!(show.stats().discarded, 0);
            });
        }
        s.spawn(|| {
            for tick in 1..=2_000u64 {
                show.refresh(Timestamp::from_millis(tick * 10));
            }
        });
    });

    for door in &DOORS {
        let snap = show.indicator(door.line).unwrap().snapshot();
        assert_eq!(snap.level, board.line(door.line).level(), "{}", door.display_name);
        assert!(snap.level_changed_at <= Timestamp::from_millis(20_000));
    }
    assert_eq!(show.stats().accepted, 2_000);
}

#[test]
fn last_request_wins_after_contention() {
    let mut board = MockBoard::new();
    let show = ShowController::from_table(&DOORS, Timestamp::ZERO, |l| board.open(l)).unwrap();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let mut sink = RecordingSink::default();
                for i in 0..200u64 {
                    let payload: &[u8] = if i % 2 == 0 { b"0" } else { b"1" };
                    show.ingest(&Notification::new(FRONT, payload), Timestamp::from_millis(i), &mut sink);
                }
            });
        }
    });

    let mut sink = RecordingSink::default();
    show.ingest(&Notification::new(FRONT, b"0"), Timestamp::from_secs(1), &mut sink);
    show.refresh(Timestamp::from_secs(2));

    let front = show.indicator(FRONT_DOOR_LED).unwrap();
    assert_eq!(front.state(), IndicatorState::On);
    assert!(board.line(FRONT_DOOR_LED).level());
    // Untouched by the contention.
    assert_eq!(
        show.indicator(GARAGE_DOOR_LED).unwrap().snapshot().state_entered_at,
        Timestamp::ZERO
    );
}
