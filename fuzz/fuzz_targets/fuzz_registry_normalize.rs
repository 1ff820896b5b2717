#![no_main]

use libfuzzer_sys::fuzz_target;
use registry_lookup::GeocodeQuery;
use registry_lookup::normalize::{digits_only, fold_status};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        let digits = digits_only(s);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));

        let folded = fold_status(s);
        assert_eq!(folded.trim(), folded);

        let query = GeocodeQuery {
            address: s.to_owned(),
            ..GeocodeQuery::default()
        };
        assert!(query.search_text().contains("Brasil"));
    }
});
