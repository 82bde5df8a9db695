//! Categorical column types.
//!
//! `sex` and `rank` have a closed set of values in the dataset. Values outside
//! that set are a load error rather than a new category.

use crate::error::{Error, Result};
use core::fmt;

/// The `sex` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Every value, in key order.
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    /// Returns the dataset spelling of this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }

    /// Parses the dataset spelling. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Female" => Some(Sex::Female),
            "Male" => Some(Sex::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Sex::parse(s).ok_or_else(|| Error::invalid_selection("sex", s))
    }
}

/// The `rank` column.
///
/// Ordering follows the order the rank-distribution chart stacks its layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Prof,
    AsstProf,
    AssocProf,
}

impl Rank {
    /// Every value, in stacking order.
    pub const ALL: [Rank; 3] = [Rank::Prof, Rank::AsstProf, Rank::AssocProf];

    /// Returns the dataset spelling of this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Prof => "Prof",
            Rank::AsstProf => "AsstProf",
            Rank::AssocProf => "AssocProf",
        }
    }

    /// Parses the dataset spelling. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Prof" => Some(Rank::Prof),
            "AsstProf" => Some(Rank::AsstProf),
            "AssocProf" => Some(Rank::AssocProf),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rank::parse(s).ok_or_else(|| Error::invalid_selection("rank", s))
    }
}
