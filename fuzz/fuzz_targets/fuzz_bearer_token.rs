#![no_main]

use gatekit_auth::{AuthConfig, HmacTokenService, TokenVerifier, parse_bearer};
use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

static VERIFIER: LazyLock<Option<HmacTokenService>> =
    LazyLock::new(|| HmacTokenService::new(&AuthConfig::with_secret("fuzz-secret")).ok());

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }
    if let Ok(header) = std::str::from_utf8(data)
        && let Some(token) = parse_bearer(header)
        && let Some(verifier) = VERIFIER.as_ref()
    {
        // Arbitrary tokens must be rejected, never accepted or panicked on
        assert!(verifier.verify(token).is_err());
    }
});
