//! Level text parsing
//!
//! A level is a plain-text grid, one row per line:
//! - `x`: wall
//! - `v`: vortex
//! - `s`: star
//! - `f`: finish
//! - ` `: empty
//!
//! Lines are reversed before indexing so row 0 is the bottom of the screen.
//! Any other character rejects the whole level.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tile_center;

/// Every kind of object that can exist in a maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Player,
    Wall,
    Star,
    Vortex,
    Finish,
    Empty,
}

impl ObjectKind {
    /// Classify a level character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(ObjectKind::Wall),
            'v' => Some(ObjectKind::Vortex),
            's' => Some(ObjectKind::Star),
            'f' => Some(ObjectKind::Finish),
            ' ' => Some(ObjectKind::Empty),
            _ => None,
        }
    }

    /// Level character for this kind (the player has none)
    pub fn as_char(&self) -> Option<char> {
        match self {
            ObjectKind::Wall => Some('x'),
            ObjectKind::Vortex => Some('v'),
            ObjectKind::Star => Some('s'),
            ObjectKind::Finish => Some('f'),
            ObjectKind::Empty => Some(' '),
            ObjectKind::Player => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Player => "player",
            ObjectKind::Wall => "wall",
            ObjectKind::Star => "star",
            ObjectKind::Vortex => "vortex",
            ObjectKind::Finish => "finish",
            ObjectKind::Empty => "empty",
        }
    }

    /// Star, vortex and finish: overlap is reported but never blocks
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            ObjectKind::Star | ObjectKind::Vortex | ObjectKind::Finish
        )
    }
}

/// Level text contained something other than `x`, `v`, `s`, `f` or space
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character {found:?} in level text at line {line}, column {column}")]
pub struct ParseError {
    pub found: char,
    /// 0-based line in the raw text (top line is 0)
    pub line: usize,
    /// 0-based character column
    pub column: usize,
}

/// One classified, non-empty cell ready to be spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub kind: ObjectKind,
    pub row: usize,
    pub column: usize,
    pub position: Vec2,
}

/// Parsed level, row 0 at the bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGrid {
    rows: Vec<Vec<ObjectKind>>,
    tile_size: f32,
}

impl LevelGrid {
    pub fn rows(&self) -> &[Vec<ObjectKind>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[ObjectKind]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn get(&self, row: usize, column: usize) -> Option<ObjectKind> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Spawnable cells in row-major order, bottom row first. Empty cells are skipped.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let tile_size = self.tile_size;
        self.rows.iter().enumerate().flat_map(move |(row, kinds)| {
            kinds
                .iter()
                .enumerate()
                .filter(|(_, kind)| **kind != ObjectKind::Empty)
                .map(move |(column, &kind)| Cell {
                    kind,
                    row,
                    column,
                    position: tile_center(row, column, tile_size),
                })
        })
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|k| **k == kind).count())
            .sum()
    }
}

/// Parse raw level text into a grid.
///
/// Lines are split on `\n` exactly as written: a terminal newline produces a
/// trailing empty line, which becomes an empty row 0. Nothing is produced if
/// any character is unknown.
pub fn parse_level(raw: &str, tile_size: f32) -> Result<LevelGrid, ParseError> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let line_count = lines.len();

    let mut rows = Vec::with_capacity(line_count);
    for (row, text) in lines.iter().rev().enumerate() {
        let line = line_count - 1 - row;
        let kinds = text
            .chars()
            .enumerate()
            .map(|(column, c)| {
                ObjectKind::from_char(c).ok_or(ParseError {
                    found: c,
                    line,
                    column,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(kinds);
    }

    log::debug!("Parsed level: {} rows", rows.len());
    Ok(LevelGrid { rows, tile_size })
}
