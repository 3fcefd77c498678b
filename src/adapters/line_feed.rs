//! Line-oriented notification feed for host simulation.
//!
//! Stands in for the MQTT client when running off-target: each input line
//! is `<topic> <payload>` (payload may be empty), in the same shape
//! `mosquitto_sub -v` prints.  End of input ends the feed.

use std::io::{self, BufRead};

use embedded_hal::digital::OutputPin;
use log::info;

use crate::app::ports::{Clock, EventSink};
use crate::notification::Notification;
use crate::show::ShowController;

pub struct LineFeed<R> {
    reader: R,
}

impl<R: BufRead> LineFeed<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Ingest every line until EOF.  Returns the number of lines read.
    pub fn run<P: OutputPin>(
        self,
        show: &ShowController<P>,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> io::Result<u64> {
        let mut count = 0;
        for line in self.reader.lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            count += 1;
            let (topic, payload) = line.split_once(' ').unwrap_or((line, ""));
            show.ingest(&Notification::new(topic, payload.as_bytes()), clock.now(), sink);
        }
        info!("Feed: end of input after {} messages", count);
        Ok(count)
    }
}
