use quick_xml::{escape::EscapeError, events::attributes::AttrError};

pub(crate) const EMPTY_DOCUMENT: &str = "document contains no root element";
pub(crate) const PARSE_FAILURE_MSG: &str = "Could not parse BPMN diagram";

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("attribute error: {0}")]
    Attribute(#[from] AttrError),

    #[error("escape error: {0}")]
    Escape(#[from] EscapeError),

    #[error("{}", EMPTY_DOCUMENT)]
    EmptyDocument,

    #[error("second root element: {0}")]
    MultipleRoots(String),

    #[error("element not closed: {0}")]
    UnclosedElement(String),

    #[error("end tag without start: {0}")]
    UnexpectedEnd(String),
}
