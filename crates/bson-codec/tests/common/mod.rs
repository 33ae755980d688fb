//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::path::Path;

/// Parse `hexdump -C` output back into bytes.
///
/// Each data line is an offset, up to sixteen hex byte columns and an ASCII
/// gutter between `|` bars; the final line holds only the total length.
pub fn parse_hexdump(dump: &str) -> Vec<u8> {
    let mut digits = String::new();
    for line in dump.lines() {
        let data = line.split('|').next().unwrap_or("");
        let mut columns = data.split_whitespace();
        let _offset = columns.next();
        for byte in columns {
            digits.push_str(byte);
        }
    }
    hex::decode(&digits).expect("malformed hex dump")
}

/// Load `tests/testdata/<name>.hex`.
pub fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(format!("{name}.hex"));
    let dump = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
    parse_hexdump(&dump)
}

/// Hex string, for readable assertion failures.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
