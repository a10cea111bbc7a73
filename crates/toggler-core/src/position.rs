//! Positions and selections.
//!
//! Columns are counted in characters (Unicode scalar values), lines are zero-based.

use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionDirection {
    /// Forward selection: the active end is `end`.
    #[default]
    Forward,
    /// Backward selection: the active end is `start`.
    Backward,
}

/// Selection range.
///
/// `start <= end` always holds; [`Selection::from_anchor`] normalizes anchor/active pairs and
/// records which end is active in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Selection start position
    pub start: Position,
    /// Selection end position
    pub end: Position,
    /// Selection direction
    pub direction: SelectionDirection,
}

impl Selection {
    /// A collapsed selection (a cursor) at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
            direction: SelectionDirection::Forward,
        }
    }

    /// A forward selection from `start` to `end`, swapped if given out of order.
    pub fn new(start: Position, end: Position) -> Self {
        Self::from_anchor(start, end)
    }

    /// Build a selection from where it was anchored and where the active end is.
    pub fn from_anchor(anchor: Position, active: Position) -> Self {
        if anchor <= active {
            Self {
                start: anchor,
                end: active,
                direction: SelectionDirection::Forward,
            }
        } else {
            Self {
                start: active,
                end: anchor,
                direction: SelectionDirection::Backward,
            }
        }
    }

    /// Build a selection covering whole lines `start_line..=end_line`, ending at `end_column`.
    pub fn lines(start_line: usize, end_line: usize, end_column: usize) -> Self {
        Self::new(
            Position::new(start_line, 0),
            Position::new(end_line, end_column),
        )
    }

    /// The position the user would see the caret at.
    pub fn active(&self) -> Position {
        match self.direction {
            SelectionDirection::Forward => self.end,
            SelectionDirection::Backward => self.start,
        }
    }

    /// The fixed end of the selection.
    pub fn anchor(&self) -> Position {
        match self.direction {
            SelectionDirection::Forward => self.start,
            SelectionDirection::Backward => self.end,
        }
    }

    /// Returns `true` if the selection has no extent.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if the selection has a non-zero extent.
    pub fn is_highlighted(&self) -> bool {
        !self.is_caret()
    }

    /// Returns `true` if the selection spans more than one line.
    pub fn is_multi_line(&self) -> bool {
        self.start.line != self.end.line
    }

    /// Returns `true` if `line` is one of the lines this selection touches.
    pub fn contains_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    /// Returns `true` if `pos` lies within the selection, boundaries included.
    pub fn contains_position_inclusive(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}
