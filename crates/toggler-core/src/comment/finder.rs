use std::sync::Arc;

use regex::Regex;
use toggler_lang::DelimiterConfig;
use tracing::debug;

use super::{Comment, CommentType};
use crate::buffer::BufferAccess;
use crate::error::{ToggleError, ToggleResult};
use crate::position::{Position, Selection};

/// Block comments are probed at most this many lines away from the selection.
pub const MAX_BLOCK_PROBE_LINES: usize = 150;

const NO_COMMENT_FOUND: &str = "Could not parse a valid comment encompassing the current line.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeDirection {
    Anchor,
    Up,
    Down,
}

/// The candidate cannot form a comment around the selection; try the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InvalidComment;

type Probe<T> = Result<T, InvalidComment>;

/// Finds the comment (or run of plain text) surrounding a selection.
pub struct CommentFinder<'a, B: BufferAccess + ?Sized> {
    buffer: &'a B,
    delimiters: Arc<DelimiterConfig>,
}

impl<'a, B: BufferAccess + ?Sized> CommentFinder<'a, B> {
    /// Create a finder over `buffer` using `delimiters`.
    pub fn new(buffer: &'a B, delimiters: Arc<DelimiterConfig>) -> Self {
        Self { buffer, delimiters }
    }

    /// Try line comments, then block comments, then plain text, and return the first that
    /// encloses `selection`.
    pub fn find(&self, selection: Selection) -> ToggleResult<Comment> {
        for mut pattern in self.patterns()? {
            let comment_type = pattern.comment_type();
            let probe = Prober {
                buffer: self.buffer,
                selection,
                highlighted: selection.is_highlighted(),
            };
            match probe.run(&mut pattern) {
                Ok((top, bottom)) => {
                    let lines = match pattern.content_lines(self.buffer, top, bottom) {
                        Ok(lines) => lines,
                        Err(InvalidComment) => continue,
                    };
                    debug!(?comment_type, top, bottom, "comment found");
                    let comment_selection = Selection::new(
                        Position::new(top, 0),
                        Position::new(bottom, self.buffer.line_len(bottom)),
                    );
                    return Ok(Comment::new(
                        comment_selection,
                        comment_type,
                        lines,
                        self.buffer.first_non_whitespace_column(top),
                        Arc::clone(&self.delimiters),
                    ));
                }
                Err(InvalidComment) => {
                    debug!(?comment_type, line = selection.start.line, "candidate rejected");
                }
            }
        }
        Err(ToggleError::user(NO_COMMENT_FOUND))
    }

    fn patterns(&self) -> ToggleResult<Vec<CommentPattern>> {
        let regex = &self.delimiters.regex;
        let mut patterns = vec![CommentPattern::Line {
            regex: comment_line_regex(&regex.line)?,
        }];
        if self.delimiters.has_block() {
            patterns.push(CommentPattern::Block(BlockState {
                top: comment_line_regex(&regex.block_start)?,
                middle: comment_line_regex(&regex.block_middle)?,
                bottom: comment_line_regex(&regex.block_end)?,
                top_line: None,
                bottom_line: None,
                probed: 0,
            }));
        }
        patterns.push(CommentPattern::Free);
        Ok(patterns)
    }
}

fn comment_line_regex(prefix: &str) -> ToggleResult<Regex> {
    Ok(Regex::new(&format!(
        r"^(?P<indentation>\s*)(?P<prefix>{prefix}) ?(?P<content>.*)$"
    ))?)
}

fn content_of(line: &str, regex: &Regex) -> Probe<String> {
    regex
        .captures(line)
        .and_then(|caps| caps.name("content"))
        .map(|m| m.as_str().to_string())
        .ok_or(InvalidComment)
}

/// The shared probing loop: anchor line, then up, then down.
struct Prober<'a, B: BufferAccess + ?Sized> {
    buffer: &'a B,
    selection: Selection,
    highlighted: bool,
}

impl<B: BufferAccess + ?Sized> Prober<'_, B> {
    fn run(&self, pattern: &mut CommentPattern) -> Probe<(usize, usize)> {
        let anchor = self.selection.start.line;
        if !pattern.matches_line(self, anchor, ProbeDirection::Anchor)? {
            return Err(InvalidComment);
        }

        let mut top = anchor;
        while top > 0 && pattern.matches_line(self, top - 1, ProbeDirection::Up)? {
            top -= 1;
        }

        let mut bottom = anchor;
        let line_count = self.buffer.line_count();
        while bottom + 1 < line_count && pattern.matches_line(self, bottom + 1, ProbeDirection::Down)?
        {
            bottom += 1;
        }

        if !pattern.is_valid() {
            return Err(InvalidComment);
        }
        Ok((top, bottom))
    }

    fn is_selected(&self, line: usize) -> bool {
        self.selection.contains_line(line)
    }
}

struct BlockState {
    top: Regex,
    middle: Regex,
    bottom: Regex,
    top_line: Option<usize>,
    bottom_line: Option<usize>,
    probed: usize,
}

enum CommentPattern {
    Line { regex: Regex },
    Block(BlockState),
    Free,
}

impl CommentPattern {
    fn comment_type(&self) -> CommentType {
        match self {
            Self::Line { .. } => CommentType::Line,
            Self::Block(_) => CommentType::Block,
            Self::Free => CommentType::None,
        }
    }

    /// `Ok(true)` extends the comment, `Ok(false)` marks a boundary, `Err` rejects the candidate.
    fn matches_line<B: BufferAccess + ?Sized>(
        &mut self,
        probe: &Prober<'_, B>,
        line: usize,
        direction: ProbeDirection,
    ) -> Probe<bool> {
        match self {
            Self::Line { regex } => {
                let is_match = regex.is_match(&probe.buffer.line_text(line));
                let selected = probe.is_selected(line);
                if is_match {
                    Ok(!probe.highlighted || selected)
                } else if probe.highlighted && selected {
                    Err(InvalidComment)
                } else {
                    Ok(false)
                }
            }
            Self::Free => Ok(if probe.highlighted {
                probe.is_selected(line)
            } else {
                !probe.buffer.is_blank_line(line)
            }),
            Self::Block(state) => state.matches_line(probe, line, direction),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::Block(state) => state.top_line.is_some() && state.bottom_line.is_some(),
            Self::Line { .. } | Self::Free => true,
        }
    }

    fn content_lines<B: BufferAccess + ?Sized>(
        &self,
        buffer: &B,
        top: usize,
        bottom: usize,
    ) -> Probe<Vec<String>> {
        let raw = (top..=bottom).map(|line| buffer.line_text(line));
        match self {
            Self::Line { regex } => raw.map(|line| content_of(&line, regex)).collect(),
            Self::Free => {
                let indent = " ".repeat(buffer.first_non_whitespace_column(top));
                Ok(raw
                    .map(|line| match line.strip_prefix(indent.as_str()) {
                        Some(rest) => rest.to_string(),
                        None => line,
                    })
                    .collect())
            }
            Self::Block(state) => {
                let mut lines = Vec::with_capacity(bottom - top + 1);
                for (line, text) in (top..=bottom).zip(raw) {
                    if line == top {
                        let content = content_of(&text, &state.top)?;
                        if !content.is_empty() {
                            lines.push(content);
                        }
                    } else if line == bottom {
                        let content = content_of(&text, &state.bottom)?;
                        if !content.is_empty() {
                            lines.push(content);
                        }
                    } else {
                        lines.push(content_of(&text, &state.middle)?);
                    }
                }
                Ok(lines)
            }
        }
    }
}

impl BlockState {
    fn matches_line<B: BufferAccess + ?Sized>(
        &mut self,
        probe: &Prober<'_, B>,
        line: usize,
        direction: ProbeDirection,
    ) -> Probe<bool> {
        let text = probe.buffer.line_text(line);
        let is_top = self.top.is_match(&text);
        let is_bottom = self.bottom.is_match(&text);

        match direction {
            ProbeDirection::Up => {
                if self.top_line.is_some() {
                    return Ok(false);
                }
                if is_top {
                    self.top_line = Some(line);
                    if probe.highlighted && line != probe.selection.start.line {
                        return Err(InvalidComment);
                    }
                } else if is_bottom {
                    return Err(InvalidComment);
                }
            }
            ProbeDirection::Down => {
                if self.bottom_line.is_some() {
                    return Ok(false);
                }
                if is_bottom {
                    self.bottom_line = Some(line);
                    if probe.highlighted && line != probe.selection.end.line {
                        return Err(InvalidComment);
                    }
                } else if is_top {
                    return Err(InvalidComment);
                }
            }
            ProbeDirection::Anchor => {
                if is_top && is_bottom {
                    // Symmetric delimiters: a block opens after a blank line or at the top.
                    if line == 0 || probe.buffer.is_blank_line(line - 1) {
                        self.top_line = Some(line);
                    } else {
                        self.bottom_line = Some(line);
                    }
                } else if is_top {
                    self.top_line = Some(line);
                } else if is_bottom {
                    self.bottom_line = Some(line);
                }
            }
        }

        self.probed += 1;
        if self.probed > MAX_BLOCK_PROBE_LINES && !probe.is_selected(line) {
            return Err(InvalidComment);
        }
        Ok(true)
    }
}
