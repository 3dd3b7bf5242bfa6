use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use pages::{RegionUpdate, HIDDEN_CLASS, SPIN_CLASS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    NoWindow,
    NoDocument,
    /// The page lacks an element the program writes to.  This is a
    /// mismatch between the HTML and the program, not something a
    /// user can cause.
    MissingElement(String),
    /// A DOM call threw.
    Js(String),
}

impl Display for DomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DomError::NoWindow => f.write_str("no global window exists"),
            DomError::NoDocument => f.write_str("the window has no document"),
            DomError::MissingElement(id) => {
                write!(f, "element #{id} is missing from the HTML document")
            }
            DomError::Js(msg) => write!(f, "DOM operation failed: {msg}"),
        }
    }
}

impl Error for DomError {}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> DomError {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<DomError> for JsValue {
    fn from(e: DomError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }
}

pub(crate) fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub(crate) fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub(crate) fn element_by_id(doc: &Document, id: &str) -> Result<Element, DomError> {
    doc.get_element_by_id(id).ok_or_else(|| {
        event!(Level::ERROR, "element #{id} is missing from the HTML document");
        DomError::MissingElement(id.to_string())
    })
}

/// Creates an element with the given classes (space separated) and,
/// optionally, text.
pub(crate) fn create_element(
    doc: &Document,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Result<Element, DomError> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if text.is_some() {
        el.set_text_content(text);
    }
    Ok(el)
}

/// Makes one change to the trailer page.
pub(crate) fn apply_region_update(doc: &Document, update: &RegionUpdate) -> Result<(), DomError> {
    let el = element_by_id(doc, update.region())?;
    event!(Level::DEBUG, "apply_region_update: {update}");
    match update {
        RegionUpdate::SetTitle { text } => el.set_text_content(Some(*text)),
        RegionUpdate::ReplaceEmbed { embed } => el.set_inner_html(&embed.to_html()),
        RegionUpdate::SetSpinning { spinning } => {
            el.class_list().toggle_with_force(SPIN_CLASS, *spinning)?;
        }
        RegionUpdate::RevealMessage => el.class_list().remove_1(HIDDEN_CLASS)?,
    }
    Ok(())
}

#[test]
fn test_dom_error_messages() {
    assert_eq!(
        DomError::MissingElement("movie-title".to_string()).to_string(),
        "element #movie-title is missing from the HTML document"
    );
    assert_eq!(DomError::NoWindow.to_string(), "no global window exists");
}
