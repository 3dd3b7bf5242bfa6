//! Runs the trailer keys program on key codes given on the command
//! line or read from standard input.
use std::error::Error;
use std::io::BufRead;

use tracing::{event, Level};

use base::{DispatchTable, KeyCode, KeyCodeParseError};
use pages::{Dispatch, TrailerPage};

use crate::output::TerminalWriter;

/// Splits `line` into key codes.  Tokens are separated by whitespace
/// or commas.
pub(crate) fn parse_codes(line: &str) -> Result<Vec<KeyCode>, KeyCodeParseError> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

fn press_all(
    page: &mut TrailerPage,
    codes: &[KeyCode],
    out: &mut TerminalWriter,
) -> Result<(), std::io::Error> {
    for code in codes {
        let (dispatch, updates) = page.press(*code);
        if dispatch == Dispatch::Ignored {
            event!(Level::DEBUG, "key code {code} does nothing");
        }
        for update in &updates {
            out.write_update(*code, update)?;
        }
    }
    Ok(())
}

pub(crate) fn run_trailers(
    codes: &[KeyCode],
    out: &mut TerminalWriter,
) -> Result<(), Box<dyn Error>> {
    let mut page = TrailerPage::new(DispatchTable::fast_and_furious());
    if !codes.is_empty() {
        press_all(&mut page, codes, out)?;
        return Ok(());
    }
    event!(Level::INFO, "No key codes given, reading them from stdin");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let codes = parse_codes(&line?)?;
        press_all(&mut page, &codes, out)?;
    }
    Ok(())
}

#[test]
fn test_parse_codes() {
    assert_eq!(
        parse_codes(" 116, F9\t32  "),
        Ok(vec![KeyCode::new(116), KeyCode::new(120), KeyCode::new(32)])
    );
    assert_eq!(parse_codes(""), Ok(vec![]));
    assert!(parse_codes("116 space").is_err());
}
