#![no_main]

//! Command parser fuzzer.
//!
//! Any text either fails to parse or yields a command whose printed form
//! parses back to the same command.

use libfuzzer_sys::fuzz_target;
use pocket_kingdom::Command;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(command) = text.parse::<Command>() {
        let printed = command.to_string();
        assert_eq!(printed.parse::<Command>().ok(), Some(command));
    }
});
