use std::sync::Arc;

use toggler_lang::DelimiterConfig;

use super::CommentType;
use crate::position::Selection;

/// A parsed comment: whole lines, their content without delimiters, and the indentation of the
/// first line.
///
/// Only [`CommentFinder`](super::CommentFinder) builds these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    selection: Selection,
    comment_type: CommentType,
    lines: Vec<String>,
    indentation: usize,
    delimiters: Arc<DelimiterConfig>,
}

impl Comment {
    pub(crate) fn new(
        selection: Selection,
        comment_type: CommentType,
        lines: Vec<String>,
        indentation: usize,
        delimiters: Arc<DelimiterConfig>,
    ) -> Self {
        Self {
            selection,
            comment_type,
            lines,
            indentation,
            delimiters,
        }
    }

    /// The lines covered, from column 0 of the first to the end of the last.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The representation the lines were parsed as.
    pub fn comment_type(&self) -> CommentType {
        self.comment_type
    }

    /// Content lines with delimiters and indentation removed.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Indentation width applied to every rendered line.
    pub fn indentation(&self) -> usize {
        self.indentation
    }

    /// Types this comment can be rendered as, in toggle order.
    pub fn available_comment_types(&self) -> Vec<CommentType> {
        let mut types = vec![CommentType::None, CommentType::Line];
        if self.delimiters.has_block() {
            types.push(CommentType::Block);
        }
        types
    }

    /// Render the content as `comment_type`.
    pub fn to_comment_string(&self, comment_type: CommentType) -> String {
        let display = &self.delimiters.display;
        let rendered: Vec<String> = match comment_type {
            CommentType::Line => self
                .lines
                .iter()
                .map(|line| format!("{}{line}", display.line))
                .collect(),
            CommentType::Block => std::iter::once(display.block_start.clone())
                .chain(
                    self.lines
                        .iter()
                        .map(|line| format!("{}{line}", display.block_middle)),
                )
                .chain(std::iter::once(display.block_end.clone()))
                .collect(),
            CommentType::None => self.lines.clone(),
        };

        let indent = " ".repeat(self.indentation);
        rendered
            .iter()
            .map(|line| format!("{indent}{line}").trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
