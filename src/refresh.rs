//! Periodic refresh loop and cooperative shutdown.
//!
//! The loop is the only blocking point in the system: it sleeps between
//! ticks and otherwise just calls [`ShowController::refresh`].  Shutdown is
//! checked between ticks, never inside one, so a tick in flight always
//! completes before the lines are released.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use embedded_hal::digital::OutputPin;
use log::info;

use crate::app::ports::{Clock, EventSink};
use crate::show::ShowController;
use crate::timing::REFRESH_INTERVAL_MS;

/// Cloneable stop flag shared between the loop and whoever ends it.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct RefreshLoop {
    interval: Duration,
}

impl Default for RefreshLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshLoop {
    /// Loop at the fixed 10 Hz cadence.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(REFRESH_INTERVAL_MS))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    /// Tick `show` until `shutdown` is requested, then release every line.
    /// Returns the number of ticks run.
    pub fn run<P: OutputPin>(
        &self,
        show: &ShowController<P>,
        clock: &impl Clock,
        shutdown: &ShutdownSignal,
        sink: &mut impl EventSink,
    ) -> u64 {
        info!("Refresh loop started ({} ms)", self.interval.as_millis());
        let mut ticks: u64 = 0;

        while !shutdown.is_requested() {
            show.refresh(clock.now());
            ticks += 1;
            std::thread::sleep(self.interval);
        }

        info!("Shutting down after {} ticks", ticks);
        show.release(sink);
        ticks
    }
}
