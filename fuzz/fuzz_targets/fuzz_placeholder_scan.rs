#![no_main]

use libfuzzer_sys::fuzz_target;
use simple_mysql::params::placeholder::scan;

fuzz_target!(|data: &[u8]| {
    let Ok(sql) = std::str::from_utf8(data) else {
        return;
    };

    let scanned = scan(sql);

    // Rewriting only ever replaces `:name` with `?`
    assert!(scanned.sql.len() <= sql.len());
    assert_eq!(scan(&scanned.sql).positional, scanned.positional + scanned.named.len());
});
