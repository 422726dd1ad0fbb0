#![no_main]

use libfuzzer_sys::fuzz_target;
use simple_mysql::Dsn;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must survive being rendered and parsed again
    if let Ok(dsn) = Dsn::parse(s) {
        let _ = Dsn::parse(&dsn.to_string());
    }
});
