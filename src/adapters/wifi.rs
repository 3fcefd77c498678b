//! WiFi station-mode bring-up.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: only credential validation; the host already
//!   has a network.
//!
//! Reconnection after the initial join is left to the ESP-IDF driver and
//! the MQTT client; the indicators keep running their blink timeouts while
//! the link is down.

use crate::error::CommsError;

/// Validated station credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

impl WifiCredentials {
    /// SSID must be 1-32 printable ASCII bytes; password empty (open
    /// network) or 8-64 bytes.
    pub fn new(ssid: &str, password: &str) -> Result<Self, CommsError> {
        if ssid.is_empty() || !is_printable_ascii(ssid) {
            return Err(CommsError::InvalidSsid);
        }
        if !password.is_empty() && password.len() < 8 {
            return Err(CommsError::InvalidPassword);
        }
        Ok(Self {
            ssid: heapless::String::try_from(ssid).map_err(|()| CommsError::InvalidSsid)?,
            password: heapless::String::try_from(password)
                .map_err(|()| CommsError::InvalidPassword)?,
        })
    }

    pub fn ssid(&self) -> &str {
        self.ssid.as_str()
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

#[cfg(target_os = "espidf")]
pub use esp::connect;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
    use log::{error, info};

    use super::WifiCredentials;
    use crate::error::CommsError;

    /// Join the access point and block until the interface has an address.
    pub fn connect(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
        creds: &WifiCredentials,
    ) -> Result<BlockingWifi<EspWifi<'static>>, CommsError> {
        let fail = |e: esp_idf_svc::sys::EspError| {
            error!("WiFi: {e}");
            CommsError::WifiConnectFailed
        };

        let driver = EspWifi::new(modem, sysloop.clone(), Some(nvs)).map_err(fail)?;
        let mut wifi = BlockingWifi::wrap(driver, sysloop).map_err(fail)?;

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: creds.ssid.clone(),
            password: creds.password.clone(),
            auth_method: if creds.is_open() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        }))
        .map_err(fail)?;

        info!("WiFi: connecting to '{}'", creds.ssid());
        wifi.start().map_err(fail)?;
        wifi.connect().map_err(fail)?;
        wifi.wait_netif_up().map_err(fail)?;

        let ip = wifi.wifi().sta_netif().get_ip_info().map_err(fail)?;
        info!("WiFi: connected, ip={}", ip.ip);
        Ok(wifi)
    }
}
