//! Core data model: brick types, colors, and placed bricks.
//!
//! A `Brick` is the live, scene-owned value (it carries a `BrickId`).
//! A `BrickRecord` is its serializable projection, the shape stored in
//! undo history and in saved models: `{type, color, size, x, y}`.

use crate::geometry;
use crate::id::BrickId;
use crate::parse::{self, ParseError};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale factor at which the geometry table is expressed.
pub const BASE_SIZE: u32 = 40;

// ─── Brick types ─────────────────────────────────────────────────────────

/// Brick footprint, named by its stud designation.
///
/// Designations outside the fixed table are kept as `Other` so that data
/// written by newer editors survives a load/save cycle. They render with
/// the 2x2 fallback geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BrickType {
    OneByOne,
    OneByTwo,
    OneByFour,
    #[default]
    TwoByTwo,
    TwoByFour,
    Other(String),
}

impl BrickType {
    pub const ALL: [BrickType; 5] = [
        BrickType::OneByOne,
        BrickType::OneByTwo,
        BrickType::OneByFour,
        BrickType::TwoByTwo,
        BrickType::TwoByFour,
    ];

    /// Resolve a designation string. Unknown or malformed designations
    /// become `Other`; this never fails.
    pub fn from_designation(designation: &str) -> Self {
        match parse::parse_designation(designation) {
            Ok((1, 1)) => Self::OneByOne,
            Ok((1, 2)) => Self::OneByTwo,
            Ok((1, 4)) => Self::OneByFour,
            Ok((2, 2)) => Self::TwoByTwo,
            Ok((2, 4)) => Self::TwoByFour,
            _ => Self::Other(designation.to_string()),
        }
    }

    pub fn designation(&self) -> &str {
        match self {
            Self::OneByOne => "1x1",
            Self::OneByTwo => "1x2",
            Self::OneByFour => "1x4",
            Self::TwoByTwo => "2x2",
            Self::TwoByFour => "2x4",
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for BrickType {
    fn from(s: String) -> Self {
        Self::from_designation(&s)
    }
}

impl From<&str> for BrickType {
    fn from(s: &str) -> Self {
        Self::from_designation(s)
    }
}

impl From<BrickType> for String {
    fn from(t: BrickType) -> Self {
        match t {
            BrickType::Other(s) => s,
            known => known.designation().to_string(),
        }
    }
}

impl fmt::Display for BrickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designation())
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// A brick color as an RGB string.
///
/// Colors entered by the user go through [`BrickColor::parse`] and are
/// normalized to lowercase `#rrggbb`. Colors read back from storage are
/// kept verbatim, so statistics group them exactly as they were saved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrickColor(String);

impl BrickColor {
    /// Parse and normalize a user-entered color.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse::parse_color(input).map(Self::from_rgb)
    }

    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Wrap a stored color string without validation.
    pub fn verbatim(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RGB channels, if the string is a parseable color.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        parse::parse_color(&self.0).ok()
    }
}

impl Default for BrickColor {
    fn default() -> Self {
        Self("#ef4444".to_string())
    }
}

impl fmt::Display for BrickColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Bricks ──────────────────────────────────────────────────────────────

/// A brick placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub id: BrickId,
    pub kind: BrickType,
    pub color: BrickColor,
    /// Scale factor; the geometry table is expressed at [`BASE_SIZE`].
    pub size: u32,
    /// Top-left corner in building-area coordinates.
    pub x: f64,
    pub y: f64,
}

impl Brick {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Rendered size after scaling.
    pub fn extent(&self) -> Size {
        geometry::scaled_size(&self.kind, self.size)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.extent())
    }

    pub fn record(&self) -> BrickRecord {
        BrickRecord {
            kind: self.kind.clone(),
            color: self.color.clone(),
            size: self.size,
            x: self.x,
            y: self.y,
        }
    }
}

/// Serializable brick data, without identity or rendering state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickRecord {
    #[serde(rename = "type")]
    pub kind: BrickType,
    pub color: BrickColor,
    pub size: u32,
    pub x: f64,
    pub y: f64,
}

impl BrickRecord {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
