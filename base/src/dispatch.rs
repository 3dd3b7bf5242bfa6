//! The dispatch table maps a key code to the trailer it selects.
//!
//! The table is fixed when it is built and is never modified
//! afterwards.  Lookups are total: a code which is not in the table
//! simply isn't found, and that is not an error.
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::keys::{KeyCode, TOGGLE_SPIN};

pub const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";
pub const EMBED_URL_SUFFIX: &str = "?&autoplay=1";

/// Permissions granted to the embedded player.
pub const EMBED_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";
pub const EMBED_WIDTH: u32 = 800;
pub const EMBED_HEIGHT: u32 = 600;

/// A trailer: the video provider's identifier for it, and the title
/// we show above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayRecord {
    pub external_id: &'static str,
    pub title: &'static str,
}

impl DisplayRecord {
    pub const fn new(external_id: &'static str, title: &'static str) -> DisplayRecord {
        DisplayRecord { external_id, title }
    }

    /// The identifier is interpolated as-is.  Identifiers issued by
    /// the provider are URL-safe, so no escaping is done.
    #[must_use]
    pub fn embed_url(&self) -> String {
        format!("{EMBED_URL_PREFIX}{}{EMBED_URL_SUFFIX}", self.external_id)
    }
}

// Browsers report F1 as 112, F2 as 113 and so on.
const FAST_AND_FURIOUS: &[(u32, DisplayRecord)] = &[
    (112, DisplayRecord::new("2TAOizOnNPo", "The Fast and the Furious")),
    (113, DisplayRecord::new("F_VIM03DXWI", "2 Fast 2 Furious")),
    (
        114,
        DisplayRecord::new("p8HQ2JLlc4E", "The Fast and the Furious: Tokyo Drift"),
    ),
    (115, DisplayRecord::new("9eBR_u2iRus", "Fast & Furious")),
    (116, DisplayRecord::new("mw2AqdB5EVA", "Fast Five")),
    (117, DisplayRecord::new("dKi5XoeTN0k", "Fast & Furious 6")),
    (118, DisplayRecord::new("Skpu5HaVkOc", "Furious 7")),
    (119, DisplayRecord::new("uisBaTkQAEs", "The Fate of the Furious")),
    (120, DisplayRecord::new("FUK2kdPsBws", "F9")),
    (121, DisplayRecord::new("Qau7AQIogVs", "Fast X")),
    (
        122,
        DisplayRecord::new("9SA7FaKxZVI", "Fast & Furious Presents: Hobbs & Shaw"),
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The same key code appeared twice.
    DuplicateKeyCode(KeyCode),
    /// The toggle code is handled before the table is consulted, so
    /// an entry for it could never be selected.
    ReservedKeyCode(KeyCode),
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DuplicateKeyCode(code) => {
                write!(f, "key code {code} appears more than once in the table")
            }
            TableError::ReservedKeyCode(code) => {
                write!(f, "key code {code} is reserved and cannot select a record")
            }
        }
    }
}

impl Error for TableError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DispatchTable {
    records: BTreeMap<KeyCode, DisplayRecord>,
}

impl DispatchTable {
    /// The table of Fast & Furious trailers, on keys F1 to F11.
    pub fn fast_and_furious() -> DispatchTable {
        DispatchTable {
            records: FAST_AND_FURIOUS
                .iter()
                .map(|(code, record)| (KeyCode::new(*code), *record))
                .collect(),
        }
    }

    /// Builds a table from arbitrary entries.
    ///
    /// # Errors
    ///
    /// Fails if a key code is repeated or if an entry uses the
    /// reserved toggle code.
    pub fn from_entries<I>(entries: I) -> Result<DispatchTable, TableError>
    where
        I: IntoIterator<Item = (KeyCode, DisplayRecord)>,
    {
        let mut records = BTreeMap::new();
        for (code, record) in entries {
            if code == TOGGLE_SPIN {
                return Err(TableError::ReservedKeyCode(code));
            }
            if records.insert(code, record).is_some() {
                return Err(TableError::DuplicateKeyCode(code));
            }
        }
        Ok(DispatchTable { records })
    }

    pub fn lookup(&self, code: KeyCode) -> Option<&DisplayRecord> {
        self.records.get(&code)
    }

    pub fn contains(&self, code: KeyCode) -> bool {
        self.records.contains_key(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, &DisplayRecord)> {
        self.records.iter().map(|(code, record)| (*code, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::fast_and_furious()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn builtin_table_covers_f1_to_f11() {
        let table = DispatchTable::fast_and_furious();
        assert_eq!(table.len(), 11);
        let codes: Vec<u32> = table.iter().map(|(code, _)| code.value()).collect();
        assert_eq!(codes, (112..=122).collect::<Vec<u32>>());
        assert!(!table.contains(TOGGLE_SPIN));
    }

    #[test]
    fn fast_five_is_on_f5() {
        let table = DispatchTable::fast_and_furious();
        let record = table
            .lookup(KeyCode::new(116))
            .expect("F5 should select a trailer");
        assert_eq!(record.title, "Fast Five");
        assert_eq!(record.external_id, "mw2AqdB5EVA");
    }

    #[test]
    fn builtin_table_passes_validation() {
        let entries = DispatchTable::fast_and_furious()
            .iter()
            .map(|(code, record)| (code, *record))
            .collect::<Vec<_>>();
        assert_eq!(
            DispatchTable::from_entries(entries),
            Ok(DispatchTable::fast_and_furious())
        );
    }

    #[test]
    fn embed_url_interpolates_the_identifier() {
        let record = DisplayRecord::new("mw2AqdB5EVA", "Fast Five");
        assert_eq!(
            record.embed_url(),
            "https://www.youtube.com/embed/mw2AqdB5EVA?&autoplay=1"
        );
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let a = DisplayRecord::new("a", "A");
        let b = DisplayRecord::new("b", "B");
        assert_eq!(
            DispatchTable::from_entries([(KeyCode::new(65), a), (KeyCode::new(65), b)]),
            Err(TableError::DuplicateKeyCode(KeyCode::new(65)))
        );
    }

    #[test]
    fn toggle_code_is_reserved() {
        let a = DisplayRecord::new("a", "A");
        assert_eq!(
            DispatchTable::from_entries([(TOGGLE_SPIN, a)]),
            Err(TableError::ReservedKeyCode(TOGGLE_SPIN))
        );
    }

    #[proptest]
    fn lookup_agrees_with_membership(code: KeyCode) {
        let table = DispatchTable::fast_and_furious();
        assert_eq!(table.lookup(code).is_some(), table.contains(code));
        assert_eq!(table.contains(code), (112..=122).contains(&code.value()));
    }
}
