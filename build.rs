fn main() {
    // Broker and WiFi settings are baked in on ESP32, which has no command line.
    println!("cargo:rerun-if-env-changed=DOORLIGHTS_BROKER_ARGS");
    println!("cargo:rerun-if-env-changed=DOORLIGHTS_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=DOORLIGHTS_WIFI_PASS");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
