//! Key codes as delivered by keyboard events.
//!
//! Browsers report a numeric `keyCode` (or `which`) for each key
//! press.  We keep that number as-is rather than trying to interpret
//! it, because the dispatch table is keyed on exactly those numbers
//! (112 is F1, 122 is F11 and so on).
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Serialize;

#[cfg(test)]
use test_strategy::Arbitrary;

/// The numeric code of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(transparent)]
pub struct KeyCode(u32);

/// The space bar.  This code is reserved: it spins the trailer
/// instead of selecting one.
pub const TOGGLE_SPIN: KeyCode = KeyCode::new(32);

impl KeyCode {
    pub const fn new(code: u32) -> KeyCode {
        KeyCode(code)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn is_toggle(self) -> bool {
        self == TOGGLE_SPIN
    }
}

impl From<u32> for KeyCode {
    fn from(code: u32) -> KeyCode {
        KeyCode(code)
    }
}

impl From<KeyCode> for u32 {
    fn from(code: KeyCode) -> u32 {
        code.0
    }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCodeParseError {
    NotANumber { input: String, reason: ParseIntError },
    NoSuchFunctionKey { input: String },
}

impl Display for KeyCodeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeyCodeParseError::NotANumber { input, reason } => {
                write!(f, "'{input}' is not a valid key code: {reason}")
            }
            KeyCodeParseError::NoSuchFunctionKey { input } => {
                write!(f, "'{input}' is not a valid key code: no such function key")
            }
        }
    }
}

impl Error for KeyCodeParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KeyCodeParseError::NotANumber { reason, .. } => Some(reason),
            KeyCodeParseError::NoSuchFunctionKey { .. } => None,
        }
    }
}

impl FromStr for KeyCode {
    type Err = KeyCodeParseError;

    /// Accepts a decimal key code, or a function key name such as
    /// `F5` (which browsers report as 111 + n).
    fn from_str(s: &str) -> Result<KeyCode, KeyCodeParseError> {
        let trimmed = s.trim();
        let not_a_number = |reason| KeyCodeParseError::NotANumber {
            input: s.to_string(),
            reason,
        };
        match trimmed.strip_prefix(['F', 'f']) {
            Some(n) if !n.is_empty() => match n.parse::<u32>().map_err(not_a_number)? {
                n @ 1..=24 => Ok(KeyCode(111 + n)),
                _ => Err(KeyCodeParseError::NoSuchFunctionKey {
                    input: s.to_string(),
                }),
            },
            _ => trimmed.parse::<u32>().map(KeyCode).map_err(not_a_number),
        }
    }
}

#[test]
fn test_parse_decimal() {
    assert_eq!("116".parse::<KeyCode>(), Ok(KeyCode::new(116)));
    assert_eq!(" 32 ".parse::<KeyCode>(), Ok(TOGGLE_SPIN));
}

#[test]
fn test_parse_function_key() {
    assert_eq!("F1".parse::<KeyCode>(), Ok(KeyCode::new(112)));
    assert_eq!("f11".parse::<KeyCode>(), Ok(KeyCode::new(122)));
}

#[test]
fn test_parse_rejects_garbage() {
    for bad in ["", "F", "F0", "F25", "space", "-3", "1.5"] {
        let err = bad
            .parse::<KeyCode>()
            .expect_err("input should have been rejected");
        assert!(err.to_string().contains("is not a valid key code"));
    }
}

#[test]
fn test_toggle() {
    assert!(KeyCode::new(32).is_toggle());
    assert!(!KeyCode::new(116).is_toggle());
}
