//! Interrupt watcher for the host binary.
//!
//! Parks a dedicated thread on a single-threaded tokio runtime until the
//! trigger future (Ctrl-C by default) resolves, then requests shutdown.
//! The refresh loop notices between ticks, finishes the tick in flight and
//! releases every line.

use std::future::Future;
use std::io;
use std::thread::{self, JoinHandle};

use log::{info, warn};
use tokio::runtime::Builder;

use crate::refresh::ShutdownSignal;

/// Request shutdown on SIGINT / Ctrl-C.
pub fn on_ctrl_c(shutdown: ShutdownSignal) -> io::Result<JoinHandle<()>> {
    watch(tokio::signal::ctrl_c, shutdown)
}

/// Request shutdown once the future built by `trigger` resolves to `Ok`.
/// An `Err` is logged and leaves the signal untouched.
pub fn watch<T, F>(trigger: T, shutdown: ShutdownSignal) -> io::Result<JoinHandle<()>>
where
    T: FnOnce() -> F + Send + 'static,
    F: Future<Output = io::Result<()>>,
{
    let runtime = Builder::new_current_thread().enable_io().build()?;
    thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || match runtime.block_on(trigger()) {
            Ok(()) => {
                info!("Interrupt received, shutting down");
                shutdown.request();
            }
            Err(e) => warn!("Interrupt watcher stopped: {}", e),
        })
}
