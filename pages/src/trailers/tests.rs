use test_strategy::proptest;

use base::{DispatchTable, KeyCode, TOGGLE_SPIN};

use super::*;

const FAST_FIVE: KeyCode = KeyCode::new(116);
const F9: KeyCode = KeyCode::new(120);

fn table() -> DispatchTable {
    DispatchTable::fast_and_furious()
}

#[test]
fn fast_five_end_to_end() {
    let mut page = TrailerPage::new(table());
    let (dispatch, updates) = page.press(FAST_FIVE);
    assert!(dispatch.suppresses_default());
    assert_eq!(updates[0], RegionUpdate::SetTitle { text: "Fast Five" });
    match &updates[1] {
        RegionUpdate::ReplaceEmbed { embed } => {
            assert_eq!(embed.src.matches("mw2AqdB5EVA").count(), 1);
            assert_eq!(
                embed.src,
                "https://www.youtube.com/embed/mw2AqdB5EVA?&autoplay=1"
            );
        }
        other => panic!("expected the player to be replaced, got {other:?}"),
    }
    assert_eq!(updates[2], RegionUpdate::RevealMessage);
    assert_eq!(updates.len(), 3);
}

#[test]
fn every_table_entry_sets_title_and_embed() {
    for (code, record) in table().iter() {
        let mut session = Session::new();
        let dispatch = session.handle_key(&table(), code);
        assert_eq!(
            dispatch,
            Dispatch::Selected {
                record: *record,
                first_reveal: true
            }
        );
        let view = session.view();
        assert_eq!(view.title, Some(record.title));
        let embed = view.embed.expect("a selection should embed a player");
        assert_eq!(embed.src.matches(record.external_id).count(), 1);
        assert_eq!(embed.to_html().matches(record.external_id).count(), 1);
    }
}

#[test]
fn revealed_flips_once() {
    let table = table();
    let mut session = Session::new();
    assert!(!session.revealed());
    let first = session.handle_key(&table, FAST_FIVE);
    assert!(matches!(
        first,
        Dispatch::Selected {
            first_reveal: true,
            ..
        }
    ));
    for code in [F9, FAST_FIVE, KeyCode::new(112)] {
        let again = session.handle_key(&table, code);
        assert!(matches!(
            again,
            Dispatch::Selected {
                first_reveal: false,
                ..
            }
        ));
        assert!(session.revealed());
    }
}

#[test]
fn message_is_revealed_only_by_the_first_selection() {
    let mut page = TrailerPage::new(table());
    let (_, first) = page.press(FAST_FIVE);
    assert!(first.contains(&RegionUpdate::RevealMessage));
    let (_, second) = page.press(F9);
    assert!(!second.contains(&RegionUpdate::RevealMessage));
    assert_eq!(second[0], RegionUpdate::SetTitle { text: "F9" });
}

#[test]
fn toggle_only_spins() {
    let table = table();
    for already_revealed in [false, true] {
        let mut page = TrailerPage::new(table.clone());
        if already_revealed {
            page.press(F9);
        }
        let before = page.session().clone();
        let (dispatch, updates) = page.press(TOGGLE_SPIN);
        assert_eq!(dispatch, Dispatch::ToggledSpin { spinning: true });
        assert!(dispatch.suppresses_default());
        assert_eq!(updates, vec![RegionUpdate::SetSpinning { spinning: true }]);
        let after = page.session();
        assert_eq!(after.revealed(), before.revealed());
        assert_eq!(after.selected(), before.selected());
        assert_eq!(after.view().title, before.view().title);
        assert_eq!(after.view().embed, before.view().embed);

        let (dispatch, updates) = page.press(TOGGLE_SPIN);
        assert_eq!(dispatch, Dispatch::ToggledSpin { spinning: false });
        assert_eq!(updates, vec![RegionUpdate::SetSpinning { spinning: false }]);
    }
}

#[test]
fn spinning_survives_a_new_selection() {
    let mut page = TrailerPage::new(table());
    page.press(TOGGLE_SPIN);
    let (_, updates) = page.press(F9);
    assert!(page.session().spinning());
    assert!(!updates
        .iter()
        .any(|u| matches!(u, RegionUpdate::SetSpinning { .. })));
}

#[test]
fn pressing_the_same_key_twice_restarts_the_trailer() {
    let mut page = TrailerPage::new(table());
    page.press(F9);
    let (_, updates) = page.press(F9);
    assert_eq!(updates.len(), 2);
    assert!(matches!(updates[1], RegionUpdate::ReplaceEmbed { .. }));
}

#[test]
fn embed_markup() {
    let record = table()
        .lookup(FAST_FIVE)
        .copied()
        .expect("Fast Five is in the table");
    assert_eq!(
        EmbedView::for_record(&record).to_html(),
        "<iframe width=\"800\" height=\"600\" \
         src=\"https://www.youtube.com/embed/mw2AqdB5EVA?&autoplay=1\" \
         allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" \
         allowfullscreen frameborder=\"0\"></iframe>"
    );
}

#[test]
fn initial_view_is_empty() {
    let view = Session::new().view();
    assert_eq!(view, PageView::default());
    assert!(view.changes_since(&PageView::default()).is_empty());
}

#[proptest]
fn unknown_keys_change_nothing(#[strategy(0u32..112)] low: u32, selected_first: bool) {
    let code = KeyCode::new(low);
    let mut page = TrailerPage::new(table());
    if selected_first {
        page.press(F9);
    }
    if code != TOGGLE_SPIN {
        let before = page.session().clone();
        let (dispatch, updates) = page.press(code);
        assert_eq!(dispatch, Dispatch::Ignored);
        assert!(!dispatch.suppresses_default());
        assert!(updates.is_empty());
        assert_eq!(page.session(), &before);
    }
}

#[proptest]
fn codes_above_the_table_change_nothing(#[strategy(123u32..=u32::MAX)] high: u32) {
    let mut session = Session::new();
    assert_eq!(
        session.handle_key(&table(), KeyCode::new(high)),
        Dispatch::Ignored
    );
    assert_eq!(session, Session::new());
}
