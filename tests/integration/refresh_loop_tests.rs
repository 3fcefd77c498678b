//! Refresh loop running on its own thread until shutdown.

use std::io::Cursor;
use std::thread;
use std::time::{Duration, Instant};

use doorlights::adapters::interrupt;
use doorlights::adapters::line_feed::LineFeed;
use doorlights::app::events::ShowEvent;
use doorlights::app::ports::Clock;
use doorlights::notification::Notification;
use doorlights::pins::{DOORS, FRONT_DOOR_LED};
use doorlights::refresh::{RefreshLoop, ShutdownSignal};
use doorlights::show::ShowController;
use doorlights::timing::Timestamp;

use super::mock_hw::{MockBoard, RecordingSink, SteppingClock, StopOnDrop};

#[test]
fn loop_drives_lines_and_releases_on_shutdown() {
    let mut board = MockBoard::new();
    let show = ShowController::from_table(&DOORS, Timestamp::ZERO, |l| board.open(l)).unwrap();
    let clock = SteppingClock::new(Timestamp::ZERO, 100);
    let shutdown = ShutdownSignal::new();

    let (ticks, sink) = thread::scope(|s| {
        let runner = s.spawn(|| {
            let mut sink = RecordingSink::default();
            let ticks = RefreshLoop::with_interval(Duration::from_millis(1)).run(
                &show,
                &clock,
                &shutdown,
                &mut sink,
            );
            (ticks, sink)
        });
        let _stop = StopOnDrop(&shutdown);

        let mut feed_sink = RecordingSink::default();
        show.ingest(
            &Notification::new("rtl_433/pi/devices/Contact/2898343/closed", b"0"),
            clock.now(),
            &mut feed_sink,
        );

        let deadline = Instant::now() + Duration::from_secs(5);
        while !board.line(FRONT_DOOR_LED).level() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(board.line(FRONT_DOOR_LED).level(), "front door never lit");

        shutdown.request();
        runner.join().unwrap()
    });

    assert!(ticks > 0);
    assert_eq!(sink.events, vec![ShowEvent::Released]);
    for door in &DOORS {
        assert!(!board.line(door.line).level(), "{} still lit", door.display_name);
    }
}

#[test]
fn loop_exits_immediately_when_already_stopped() {
    let mut board = MockBoard::new();
    let show = ShowController::from_table(&DOORS, Timestamp::ZERO, |l| board.open(l)).unwrap();
    let clock = SteppingClock::new(Timestamp::ZERO, 100);
    let shutdown = ShutdownSignal::new();
    shutdown.request();

    let mut sink = RecordingSink::default();
    let ticks = RefreshLoop::new().run(&show, &clock, &shutdown, &mut sink);

    assert_eq!(ticks, 0);
    assert_eq!(sink.events, vec![ShowEvent::Released]);
}

#[test]
fn end_of_feed_keeps_running_until_interrupt() {
    let mut board = MockBoard::new();
    let show = ShowController::from_table(&DOORS, Timestamp::ZERO, |l| board.open(l)).unwrap();
    let clock = SteppingClock::new(Timestamp::ZERO, 100);
    let shutdown = ShutdownSignal::new();

    let (ticks, sink) = thread::scope(|s| {
        let runner = s.spawn(|| {
            let mut sink = RecordingSink::default();
            let ticks = RefreshLoop::with_interval(Duration::from_millis(1)).run(
                &show,
                &clock,
                &shutdown,
                &mut sink,
            );
            (ticks, sink)
        });
        let _stop = StopOnDrop(&shutdown);

        let input = "rtl_433/pi/devices/Contact/2898343/closed 0\n";
        let fed = LineFeed::new(Cursor::new(input))
            .run(&show, &clock, &mut RecordingSink::default())
            .unwrap();
        assert_eq!(fed, 1);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !board.line(FRONT_DOOR_LED).level() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(board.line(FRONT_DOOR_LED).level(), "front door never lit");

        // Feed is exhausted; the lights must keep running.
        thread::sleep(Duration::from_millis(20));
        assert!(!runner.is_finished());
        assert!(!shutdown.is_requested());

        interrupt::watch(|| async { Ok(()) }, shutdown.clone())
            .unwrap()
            .join()
            .unwrap();
        runner.join().unwrap()
    });

    assert!(ticks > 0);
    assert_eq!(sink.events, vec![ShowEvent::Released]);
    for door in &DOORS {
        assert!(!board.line(door.line).level(), "{} still lit", door.display_name);
    }
}
