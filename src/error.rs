use thiserror::Error;

/// Failure to split a document into front matter and body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("front matter not opened")]
    MissingFrontMatter,

    #[error("front matter not closed")]
    FrontMatterNotClosed,
}
