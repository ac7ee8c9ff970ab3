//! Face values and the catalog of die colors.
//!
//! A die is described by six ordered faces. Blank faces score nothing, numbered
//! faces score their value and the exploding face scores its bonus and grants
//! one extra draw. On disk a face is either an integer (`0` is blank) or the
//! tagged string `"{n}"` for an exploding face.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Faces on every die.
pub const FACES_PER_DIE: usize = 6;

/// Copies of each face in a deck (one deck stands in for three rolls).
pub const COPIES_PER_FACE: usize = 3;

/// Cards in a full deck.
pub const DECK_SIZE: usize = FACES_PER_DIE * COPIES_PER_FACE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawFace", into = "RawFace")]
pub enum Face {
    Blank,
    Number(u8),
    Exploding(u8),
}

impl Face {
    pub fn from_value(value: u8) -> Self {
        if value == 0 {
            Face::Blank
        } else {
            Face::Number(value)
        }
    }

    pub fn value(self) -> u32 {
        match self {
            Face::Blank => 0,
            Face::Number(n) | Face::Exploding(n) => n as u32,
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Face::Blank)
    }

    pub fn is_exploding(self) -> bool {
        matches!(self, Face::Exploding(_))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Blank => Ok(()),
            Face::Number(n) => write!(f, "{}", n),
            Face::Exploding(n) => write!(f, "{{{}}}", n),
        }
    }
}

impl FromStr for Face {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("blank") {
            return Ok(Face::Blank);
        }
        if let Some(inner) = s.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
            return inner
                .trim()
                .parse::<u8>()
                .map(Face::Exploding)
                .map_err(|_| Error::InvalidFace(s.to_string()));
        }
        s.parse::<u8>()
            .map(Face::from_value)
            .map_err(|_| Error::InvalidFace(s.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawFace {
    Value(u8),
    Tagged(String),
}

impl TryFrom<RawFace> for Face {
    type Error = Error;

    fn try_from(raw: RawFace) -> Result<Self> {
        match raw {
            RawFace::Value(v) => Ok(Face::from_value(v)),
            RawFace::Tagged(s) => s.parse(),
        }
    }
}

impl From<Face> for RawFace {
    fn from(face: Face) -> Self {
        match face {
            Face::Exploding(_) => RawFace::Tagged(face.to_string()),
            other => RawFace::Value(other.value() as u8),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DieColor {
    White,
    Yellow,
    Red,
    Black,
}

impl DieColor {
    pub const ALL: [DieColor; 4] = [DieColor::White, DieColor::Yellow, DieColor::Red, DieColor::Black];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DieColor::White => "White",
            DieColor::Yellow => "Yellow",
            DieColor::Red => "Red",
            DieColor::Black => "Black",
        }
    }
}

impl fmt::Display for DieColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DieColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DieColor::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

/// Distinct faces of `faces`, first occurrence wins.
pub fn unique_faces(faces: &[Face]) -> Vec<Face> {
    let mut unique = Vec::with_capacity(faces.len());
    for &face in faces {
        if !unique.contains(&face) {
            unique.push(face);
        }
    }
    unique
}

/// Fixed face sequence for every die color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceCatalog {
    entries: [[Face; FACES_PER_DIE]; 4],
}

impl Default for FaceCatalog {
    fn default() -> Self {
        use Face::{Blank, Exploding, Number};
        Self {
            entries: [
                [Blank, Blank, Number(1), Number(1), Number(2), Exploding(2)],
                [Blank, Blank, Number(1), Number(2), Number(3), Exploding(3)],
                [Blank, Blank, Number(2), Number(3), Number(3), Exploding(4)],
                [Blank, Blank, Number(3), Number(3), Number(4), Exploding(5)],
            ],
        }
    }
}

impl FaceCatalog {
    /// Loads a catalog shaped like `{"White": [0, 0, 1, 1, 2, "{2}"], ...}`.
    /// Colors missing from the document keep their built-in faces.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: BTreeMap<String, Vec<Face>> = serde_json::from_str(json)?;
        let mut catalog = Self::default();

        if file.is_empty() {
            warn!("catalog file defines no die colors, using built-in faces");
        }

        for (name, faces) in file {
            let color: DieColor = name.parse()?;
            let entry: [Face; FACES_PER_DIE] = faces.try_into().map_err(|_| Error::InvalidCatalog {
                color,
                reason: "expected exactly 6 faces",
            })?;
            Self::validate(color, &entry)?;
            debug!(%color, "catalog entry overridden");
            catalog.entries[color.index()] = entry;
        }

        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Two leading blanks, then non-decreasing values ending in the only exploding face.
    pub fn validate(color: DieColor, entry: &[Face; FACES_PER_DIE]) -> Result<()> {
        let invalid = |reason| Err(Error::InvalidCatalog { color, reason });

        if !entry[0].is_blank() || !entry[1].is_blank() {
            return invalid("the first two faces must be blank");
        }
        if entry[2..].iter().any(|f| f.is_blank()) {
            return invalid("exactly two faces may be blank");
        }
        if !entry[FACES_PER_DIE - 1].is_exploding() {
            return invalid("the last face must be exploding");
        }
        if entry[..FACES_PER_DIE - 1].iter().any(|f| f.is_exploding()) {
            return invalid("only the last face may explode");
        }
        if entry[2..].windows(2).any(|w| w[0].value() > w[1].value()) {
            return invalid("scoring faces must be non-decreasing");
        }
        Ok(())
    }

    pub fn faces(&self, color: DieColor) -> &[Face; FACES_PER_DIE] {
        &self.entries[color.index()]
    }

    /// Distinct faces in catalog order.
    pub fn unique_faces(&self, color: DieColor) -> Vec<Face> {
        unique_faces(self.faces(color))
    }

    /// The full 18-card composition: every face repeated in place.
    pub fn tripled(&self, color: DieColor) -> Vec<Face> {
        self.faces(color)
            .iter()
            .flat_map(|&f| std::iter::repeat(f).take(COPIES_PER_FACE))
            .collect()
    }
}
