//! Adapters: concrete implementations of the port traits and the
//! network plumbing around the core.
//!
//! | Adapter     | Implements / provides | Connects to               |
//! |-------------|-----------------------|---------------------------|
//! | `interrupt` | shutdown trigger      | SIGINT (host only)        |
//! | `line_feed` | notification source   | stdin (host simulation)   |
//! | `log_sink`  | EventSink             | Serial / stderr log       |
//! | `mqtt`      | notification source   | ESP-IDF MQTT client       |
//! | `time`      | Clock                 | ESP32 system timer        |
//! | `wifi`      | station bring-up      | ESP-IDF WiFi STA          |

#[cfg(not(target_os = "espidf"))]
pub mod interrupt;
pub mod line_feed;
pub mod log_sink;
#[cfg(target_os = "espidf")]
pub mod mqtt;
pub mod time;
pub mod wifi;
