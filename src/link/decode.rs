//! Pure decoding: answer line → register value.
//!
//! No I/O, no side effects. The interface prints registers either as plain
//! decimal or as hex without a prefix (e.g. `"40F"`); which one depends on the
//! register, so the caller picks the parser.

use crate::domain::{ToptekError, ToptekResult};

use super::Command;

/// Parse a decimal register value such as `"0"` or `"1"`.
pub fn parse_decimal(line: &str, cmd: &Command) -> ToptekResult<u32> {
    let trimmed = line.trim();
    trimmed.parse::<u32>().map_err(|e| {
        ToptekError::Protocol(format!(
            "Invalid decimal answer to {cmd:?}: '{line}' ({e})"
        ))
    })
}

/// Parse a hex register value such as `"40F"`. A `0x` prefix is tolerated.
pub fn parse_hex(line: &str, cmd: &Command) -> ToptekResult<u32> {
    let trimmed = line.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u32::from_str_radix(digits, 16).map_err(|e| {
        ToptekError::Protocol(format!("Invalid hex answer to {cmd:?}: '{line}' ({e})"))
    })
}

/// Check a fixed acknowledgement line such as `"Remote keys enabled"`.
pub fn expect_reply(line: &str, expected: &str, cmd: &Command) -> ToptekResult<()> {
    if line == expected {
        Ok(())
    } else {
        Err(ToptekError::Protocol(format!(
            "Expected '{expected}' for {cmd:?}, got: '{line}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Command::*;

    #[test]
    fn decimal_values() {
        assert_eq!(parse_decimal("0", &ReadStatus).unwrap(), 0);
        assert_eq!(parse_decimal("1", &ReadStatus).unwrap(), 1);
        assert_eq!(parse_decimal(" 12 ", &ReadStatus).unwrap(), 12);
    }

    #[test]
    fn decimal_rejects_hex_digits() {
        assert!(parse_decimal("1F", &ReadStatus).is_err());
        assert!(parse_decimal("", &ReadStatus).is_err());
        assert!(parse_decimal("Unhandled statement", &ReadStatus).is_err());
    }

    #[test]
    fn hex_values() {
        assert_eq!(parse_hex("0", &ReadLeds).unwrap(), 0);
        assert_eq!(parse_hex("40F", &ReadLeds).unwrap(), 0x40F);
        assert_eq!(parse_hex("fff", &ReadLeds).unwrap(), 0xFFF);
        assert_eq!(parse_hex("0x30", &ReadLeds).unwrap(), 0x30);
        // "10" is sixteen, not ten
        assert_eq!(parse_hex("10", &ReadStatus).unwrap(), 16);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(parse_hex("", &ReadLeds).is_err());
        assert!(parse_hex("XYZ", &ReadLeds).is_err());
        assert!(parse_hex("-1", &ReadLeds).unwrap_err().is_protocol());
    }

    #[test]
    fn reply_must_match_exactly() {
        assert!(expect_reply("Remote keys enabled", "Remote keys enabled", &EnableRemote).is_ok());
        assert!(expect_reply("Remote keys disabled", "Remote keys enabled", &EnableRemote).is_err());
        assert!(expect_reply("", "Remote keys enabled", &EnableRemote).is_err());
    }
}
