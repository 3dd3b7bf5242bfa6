//! The trailer keys program.
//!
//! Pressing one of F1 to F11 shows the title of a Fast & Furious
//! film and plays its trailer; the first such press also reveals a
//! message.  Space sets the trailer spinning (or stops it).  Any
//! other key does nothing.
//!
//! Key presses only change a [`Session`].  What the page should look
//! like is derived from the session by [`Session::view`], and the
//! front end applies the [`RegionUpdate`]s between the view it last
//! drew and the new one.
use serde::Serialize;
use tracing::{event, Level};

use base::{
    DispatchTable, DisplayRecord, KeyCode, EMBED_ALLOW, EMBED_HEIGHT, EMBED_WIDTH, TOGGLE_SPIN,
};

use super::event::{Dispatch, RegionUpdate};

/// Element holding the title text.
pub const TITLE_REGION: &str = "movie-title";
/// Element holding the embedded player.
pub const EMBED_REGION: &str = "movie-trailer";
/// Element holding the message revealed by the first selection.
pub const MESSAGE_REGION: &str = "party-message";

/// Class toggled on [`EMBED_REGION`] by the space bar.
pub const SPIN_CLASS: &str = "animate-spin-slow";
/// Class removed from [`MESSAGE_REGION`] to reveal it.
pub const HIDDEN_CLASS: &str = "hidden";

/// The embedded player element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedView {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub allow: &'static str,
    pub allow_fullscreen: bool,
    pub frame_border: u32,
}

impl EmbedView {
    pub fn for_record(record: &DisplayRecord) -> EmbedView {
        EmbedView {
            src: record.embed_url(),
            width: EMBED_WIDTH,
            height: EMBED_HEIGHT,
            allow: EMBED_ALLOW,
            allow_fullscreen: true,
            frame_border: 0,
        }
    }

    /// The markup which replaces the content of [`EMBED_REGION`].
    pub fn to_html(&self) -> String {
        let fullscreen = if self.allow_fullscreen {
            " allowfullscreen"
        } else {
            ""
        };
        format!(
            "<iframe width=\"{}\" height=\"{}\" src=\"{}\" allow=\"{}\"{fullscreen} frameborder=\"{}\"></iframe>",
            self.width, self.height, self.src, self.allow, self.frame_border
        )
    }
}

/// State of one visit to the trailer page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    revealed: bool,
    spinning: bool,
    selected: Option<DisplayRecord>,
    // Counts selections, so that pressing the same key twice still
    // restarts the trailer.
    selections: u64,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Becomes true on the first selection and stays true.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn spinning(&self) -> bool {
        self.spinning
    }

    pub fn selected(&self) -> Option<&DisplayRecord> {
        self.selected.as_ref()
    }

    pub fn handle_key(&mut self, table: &DispatchTable, code: KeyCode) -> Dispatch {
        if code == TOGGLE_SPIN {
            self.spinning = !self.spinning;
            event!(
                Level::DEBUG,
                "handle_key: toggle key, spinning is now {}",
                self.spinning
            );
            return Dispatch::ToggledSpin {
                spinning: self.spinning,
            };
        }
        let Some(record) = table.lookup(code) else {
            event!(Level::TRACE, "handle_key: ignoring key code {code}");
            return Dispatch::Ignored;
        };
        event!(
            Level::INFO,
            "handle_key: key code {code} selects {:?}",
            record.title
        );
        let first_reveal = !self.revealed;
        self.revealed = true;
        self.selected = Some(*record);
        self.selections += 1;
        Dispatch::Selected {
            record: *record,
            first_reveal,
        }
    }

    #[must_use]
    pub fn view(&self) -> PageView {
        PageView {
            title: self.selected.map(|record| record.title),
            embed: self.selected.as_ref().map(EmbedView::for_record),
            spinning: self.spinning,
            message_visible: self.revealed,
            selection: self.selections,
        }
    }
}

/// What the trailer page shows.  The initial page (no title, empty
/// player, not spinning, message hidden) is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub title: Option<&'static str>,
    pub embed: Option<EmbedView>,
    pub spinning: bool,
    pub message_visible: bool,
    selection: u64,
}

impl PageView {
    /// The updates which turn a display showing `previous` into one
    /// showing `self`.
    #[must_use]
    pub fn changes_since(&self, previous: &PageView) -> Vec<RegionUpdate> {
        let mut updates = Vec::new();
        if self.selection != previous.selection {
            if let Some(text) = self.title {
                updates.push(RegionUpdate::SetTitle { text });
            }
            if let Some(embed) = &self.embed {
                updates.push(RegionUpdate::ReplaceEmbed {
                    embed: embed.clone(),
                });
            }
        }
        if self.spinning != previous.spinning {
            updates.push(RegionUpdate::SetSpinning {
                spinning: self.spinning,
            });
        }
        // The message is never hidden again once shown.
        if self.message_visible && !previous.message_visible {
            updates.push(RegionUpdate::RevealMessage);
        }
        updates
    }
}

/// A session together with the view last drawn for it.  This is
/// what a front end holds on to.
#[derive(Debug, Clone, Default)]
pub struct TrailerPage {
    table: DispatchTable,
    session: Session,
    drawn: PageView,
}

impl TrailerPage {
    pub fn new(table: DispatchTable) -> TrailerPage {
        TrailerPage {
            table,
            session: Session::new(),
            drawn: PageView::default(),
        }
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handles a key press and returns what it did along with the
    /// updates the display needs.
    pub fn press(&mut self, code: KeyCode) -> (Dispatch, Vec<RegionUpdate>) {
        let dispatch = self.session.handle_key(&self.table, code);
        let view = self.session.view();
        let updates = view.changes_since(&self.drawn);
        self.drawn = view;
        (dispatch, updates)
    }
}

#[cfg(test)]
mod tests;
