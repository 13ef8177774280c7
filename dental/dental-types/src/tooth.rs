//! Clinical tooth-position identifiers.
//!
//! Anterior teeth are identified by class and side, written `central_L`,
//! `lateral_R`, `canine_L` and so on. The `_L`/`_R` suffix is what mirroring
//! and symmetry logic use to find a tooth's contralateral counterpart.
//! FDI numbers (`11`-`13`, `21`-`23`) are accepted as an alternative input form.

use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tooth class, ordered from the midline outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ToothClass {
    /// Central incisor.
    Central,
    /// Lateral incisor.
    Lateral,
    /// Canine (cuspid).
    Canine,
}

impl ToothClass {
    /// All classes, midline outward.
    pub const ALL: [Self; 3] = [Self::Central, Self::Lateral, Self::Canine];

    /// Lowercase name used in identifiers and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Central => "central",
            Self::Lateral => "lateral",
            Self::Canine => "canine",
        }
    }

    const fn fdi_position(self) -> u8 {
        match self {
            Self::Central => 1,
            Self::Lateral => 2,
            Self::Canine => 3,
        }
    }
}

impl fmt::Display for ToothClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Patient side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Patient's right (viewer's left, negative X).
    Right,
    /// Patient's left (viewer's right, positive X).
    Left,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Identifier suffix letter.
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tooth-position identifier: class plus side.
///
/// # Example
///
/// ```
/// use dental_types::{Side, ToothClass, ToothId};
///
/// let id: ToothId = "lateral_R".parse().unwrap();
/// assert_eq!(id, ToothId::new(ToothClass::Lateral, Side::Right));
/// assert_eq!(id.counterpart().to_string(), "lateral_L");
/// assert_eq!(id.to_fdi(), 12);
///
/// let fdi: ToothId = "23".parse().unwrap();
/// assert_eq!(fdi.to_string(), "canine_L");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToothId {
    /// Tooth class.
    pub class: ToothClass,
    /// Patient side.
    pub side: Side,
}

impl ToothId {
    /// Creates an identifier.
    #[must_use]
    pub const fn new(class: ToothClass, side: Side) -> Self {
        Self { class, side }
    }

    /// The contralateral tooth of the same class.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        Self::new(self.class, self.side.opposite())
    }

    /// FDI two-digit notation (maxillary right quadrant 1, left quadrant 2).
    #[must_use]
    pub const fn to_fdi(self) -> u8 {
        let quadrant = match self.side {
            Side::Right => 1,
            Side::Left => 2,
        };
        quadrant * 10 + self.class.fdi_position()
    }

    fn from_fdi(code: u8) -> Option<Self> {
        let side = match code / 10 {
            1 => Side::Right,
            2 => Side::Left,
            _ => return None,
        };
        let class = match code % 10 {
            1 => ToothClass::Central,
            2 => ToothClass::Lateral,
            3 => ToothClass::Canine,
            _ => return None,
        };
        Some(Self::new(class, side))
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.class.name(), self.side.suffix())
    }
}

impl FromStr for ToothId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || TypesError::InvalidToothId(s.to_string());

        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_fdi(code).ok_or_else(invalid);
        }

        let (class, side) = trimmed.rsplit_once('_').ok_or_else(invalid)?;
        let side = match side {
            "L" | "l" => Side::Left,
            "R" | "r" => Side::Right,
            _ => return Err(invalid()),
        };
        let class = ToothClass::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(class))
            .ok_or_else(invalid)?;

        Ok(Self::new(class, side))
    }
}

/// Canonical left-to-right order of the anterior arch as seen by the viewer.
///
/// Symmetry and arch-integrity checks walk this sequence.
pub const ARCH_SEQUENCE: [ToothId; 6] = [
    ToothId::new(ToothClass::Canine, Side::Right),
    ToothId::new(ToothClass::Lateral, Side::Right),
    ToothId::new(ToothClass::Central, Side::Right),
    ToothId::new(ToothClass::Central, Side::Left),
    ToothId::new(ToothClass::Lateral, Side::Left),
    ToothId::new(ToothClass::Canine, Side::Left),
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip_for_arch() {
        for id in ARCH_SEQUENCE {
            let parsed: ToothId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_parse_case_insensitive_class() {
        let id: ToothId = "Canine_l".parse().unwrap();
        assert_eq!(id, ToothId::new(ToothClass::Canine, Side::Left));
    }

    #[test]
    fn test_parse_fdi() {
        assert_eq!("11".parse::<ToothId>().unwrap().to_string(), "central_R");
        assert_eq!("22".parse::<ToothId>().unwrap().to_string(), "lateral_L");
        assert!("14".parse::<ToothId>().is_err());
        assert!("31".parse::<ToothId>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "central", "central_X", "molar_L", "_L"] {
            assert!(matches!(
                bad.parse::<ToothId>(),
                Err(TypesError::InvalidToothId(_))
            ));
        }
    }

    #[test]
    fn test_counterpart_is_involution() {
        for id in ARCH_SEQUENCE {
            assert_ne!(id.counterpart(), id);
            assert_eq!(id.counterpart().counterpart(), id);
        }
    }

    #[test]
    fn test_arch_sequence_is_mirror_symmetric() {
        for i in 0..3 {
            assert_eq!(ARCH_SEQUENCE[i].counterpart(), ARCH_SEQUENCE[5 - i]);
        }
    }

    #[test]
    fn test_fdi_codes() {
        let codes: Vec<u8> = ARCH_SEQUENCE.iter().map(|id| id.to_fdi()).collect();
        assert_eq!(codes, vec![13, 12, 11, 21, 22, 23]);
    }
}
