#![no_main]

use barbergate_server::AppConfig;
use figment::Figment;
use figment::providers::{Format, Yaml};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Invalid configs must surface as errors
        let _ = Figment::new().merge(Yaml::string(s)).extract::<AppConfig>();
    }
});
