//! Digital output line driver for the indicator LEDs.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: configures the GPIO as a push-pull output via raw sys calls
//! and writes with `gpio_set_level`.
//! On host/test: tracks the level in-memory only.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use log::{debug, info};

use crate::error::HardwareError;
use crate::pins::LineId;

/// Raw `esp_err_t` from a failed GPIO call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError(pub i32);

impl embedded_hal::digital::Error for LineError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct OutputLine {
    line: LineId,
    #[cfg(not(target_os = "espidf"))]
    high: bool,
}

impl OutputLine {
    /// Configure `line` as an output and drive it LOW.
    #[cfg(target_os = "espidf")]
    pub fn open(line: LineId) -> Result<Self, HardwareError> {
        let pin = line.gpio() as i32;
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: called once per line during startup, before the refresh
        // loop or MQTT client exist.  Lines are pairwise distinct.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HardwareError::LineConfigFailed(line));
        }
        let ret = unsafe { gpio_set_level(pin, 0) };
        if ret != ESP_OK as i32 {
            return Err(HardwareError::LineWriteFailed(line));
        }
        info!("{line}: output, LOW");
        Ok(Self { line })
    }

    /// Configure `line` as an output and drive it LOW.
    #[cfg(not(target_os = "espidf"))]
    pub fn open(line: LineId) -> Result<Self, HardwareError> {
        info!("{line}(sim): output, LOW");
        Ok(Self { line, high: false })
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    #[cfg(target_os = "espidf")]
    fn write(&mut self, high: bool) -> Result<(), LineError> {
        // SAFETY: the pin was configured as an output in `open()` and is
        // only written through this driver, under its indicator's lock.
        let ret = unsafe { gpio_set_level(self.line.gpio() as i32, u32::from(high)) };
        if ret != ESP_OK as i32 {
            return Err(LineError(ret));
        }
        debug!("{} -> {}", self.line, if high { "HIGH" } else { "LOW" });
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, high: bool) -> Result<(), LineError> {
        self.high = high;
        debug!("{}(sim) -> {}", self.line, if high { "HIGH" } else { "LOW" });
        Ok(())
    }

    /// Last level written.  Simulation only.
    #[cfg(not(target_os = "espidf"))]
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for OutputLine {
    type Error = LineError;
}

impl OutputPin for OutputLine {
    fn set_low(&mut self) -> Result<(), LineError> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), LineError> {
        self.write(true)
    }
}
