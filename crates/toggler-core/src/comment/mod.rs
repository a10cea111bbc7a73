//! Comment type detection and rendering.
//!
//! [`CommentFinder`] probes outward from the primary selection to find the largest run of lines
//! that forms one coherent comment, producing a [`Comment`]. The comment can then be rendered as
//! a line comment, a block comment or plain text.

mod finder;
mod model;

pub use finder::CommentFinder;
pub use model::Comment;

/// The three representations a run of lines can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentType {
    /// Block comment (`/** ... */`, `""" ... """`, ...).
    Block,
    /// Every line prefixed with the line comment token.
    Line,
    /// Plain text.
    None,
}
