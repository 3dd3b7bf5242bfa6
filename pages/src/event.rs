use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use base::DisplayRecord;

use super::trailers::{EmbedView, EMBED_REGION, MESSAGE_REGION, TITLE_REGION};

/// What a key press did to the trailer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The key is neither the toggle key nor in the table.
    Ignored,
    /// The toggle key was pressed; `spinning` is the new state.
    ToggledSpin { spinning: bool },
    /// A trailer was selected.  `first_reveal` is true only for the
    /// first selection of the session.
    Selected {
        record: DisplayRecord,
        first_reveal: bool,
    },
}

impl Dispatch {
    /// Whether the front end should suppress the key's default
    /// effect (for example, the browser scrolling on space or
    /// reloading on F5).
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, Dispatch::Ignored)
    }
}

/// One change to one region of the trailer page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum RegionUpdate {
    SetTitle { text: &'static str },
    ReplaceEmbed { embed: EmbedView },
    SetSpinning { spinning: bool },
    RevealMessage,
}

impl RegionUpdate {
    /// The identifier of the region this update applies to.
    pub fn region(&self) -> &'static str {
        match self {
            RegionUpdate::SetTitle { .. } => TITLE_REGION,
            RegionUpdate::ReplaceEmbed { .. } | RegionUpdate::SetSpinning { .. } => EMBED_REGION,
            RegionUpdate::RevealMessage => MESSAGE_REGION,
        }
    }
}

impl Display for RegionUpdate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RegionUpdate::SetTitle { text } => write!(f, "#{TITLE_REGION}: title is now {text:?}"),
            RegionUpdate::ReplaceEmbed { embed } => {
                write!(f, "#{EMBED_REGION}: now playing {}", embed.src)
            }
            RegionUpdate::SetSpinning { spinning: true } => {
                write!(f, "#{EMBED_REGION}: spinning")
            }
            RegionUpdate::SetSpinning { spinning: false } => {
                write!(f, "#{EMBED_REGION}: no longer spinning")
            }
            RegionUpdate::RevealMessage => write!(f, "#{MESSAGE_REGION}: revealed"),
        }
    }
}

#[test]
fn test_only_ignored_keys_keep_their_default() {
    assert!(!Dispatch::Ignored.suppresses_default());
    assert!(Dispatch::ToggledSpin { spinning: true }.suppresses_default());
    assert!(Dispatch::Selected {
        record: DisplayRecord::new("mw2AqdB5EVA", "Fast Five"),
        first_reveal: false,
    }
    .suppresses_default());
}

#[test]
fn test_regions() {
    assert_eq!(RegionUpdate::SetTitle { text: "F9" }.region(), "movie-title");
    assert_eq!(
        RegionUpdate::SetSpinning { spinning: false }.region(),
        "movie-trailer"
    );
    assert_eq!(RegionUpdate::RevealMessage.region(), "party-message");
}
