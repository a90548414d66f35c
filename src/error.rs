use thiserror::Error;

/// The unified error type returned by the public API.
///
/// Only `InvalidSection`, `Parse` and `Io` ever abort a render: the layout
/// errors (`UnknownStyle`, `MediaResolution`, `MalformedColor`) are recovered
/// at the element that raised them so a partially broken definition still
/// produces a document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Report definition failed to parse as JSON or did not match the schema.
    #[error("failed to parse report definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// An element was added to a section tag the engine does not know.
    #[error("unknown report section `{0}` (expected pageheader, header, body or footer)")]
    InvalidSection(String),

    /// A style name was not found in the registry.
    #[error("unknown style `{0}`")]
    UnknownStyle(String),

    /// The media collaborator could not resolve a reference.
    #[error("cannot resolve media reference `{0}`")]
    MediaResolution(String),

    /// A color string failed the hex shape check.
    #[error("malformed color `{0}`")]
    MalformedColor(String),
}
