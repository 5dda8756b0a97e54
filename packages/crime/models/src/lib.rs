#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Reportable crime type catalog.
//!
//! Defines the fixed set of crime types a citizen can pick when filing a
//! report, along with their display metadata. Ranking results from the
//! reporting service are matched against these titles; anything that
//! does not match a known title is dropped.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Title of the catch-all category that is always offered.
pub const OTHERS_TITLE: &str = "Others";

/// A crime type the user can report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum CrimeTypeId {
    /// Insult or assault on a person's modesty
    #[serde(rename = "Outrage of Modesty")]
    #[strum(serialize = "Outrage of Modesty")]
    OutrageOfModesty,
    /// Theft by snatching from the person
    #[serde(rename = "Snatch Theft")]
    #[strum(serialize = "Snatch Theft")]
    SnatchTheft,
    /// Theft with force or threat of force
    Robbery,
    /// Breaking into a dwelling
    Housebreaking,
    /// Theft of a motor vehicle or its parts
    #[serde(rename = "Vehicle Theft")]
    #[strum(serialize = "Vehicle Theft")]
    VehicleTheft,
    /// Deception for financial gain, online or in person
    Scam,
    /// Physical attack causing hurt
    Assault,
    /// Willful damage to property
    Vandalism,
    /// Anything not covered above
    Others,
}

impl CrimeTypeId {
    /// Ordering offered when no ranking is available for a station,
    /// excluding [`Self::Others`] which is appended separately.
    pub const DEFAULT_ORDER: [Self; 3] = [Self::OutrageOfModesty, Self::SnatchTheft, Self::Robbery];

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::OutrageOfModesty,
            Self::SnatchTheft,
            Self::Robbery,
            Self::Housebreaking,
            Self::VehicleTheft,
            Self::Scam,
            Self::Assault,
            Self::Vandalism,
            Self::Others,
        ]
    }

    /// Matches a free-form crime-type name against the catalog titles.
    ///
    /// Surrounding whitespace is ignored and comparison is
    /// case-insensitive; anything else must match the title exactly.
    #[must_use]
    pub fn match_title(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// The display title, e.g. `"Snatch Theft"`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::OutrageOfModesty => "Outrage of Modesty",
            Self::SnatchTheft => "Snatch Theft",
            Self::Robbery => "Robbery",
            Self::Housebreaking => "Housebreaking",
            Self::VehicleTheft => "Vehicle Theft",
            Self::Scam => "Scam",
            Self::Assault => "Assault",
            Self::Vandalism => "Vandalism",
            Self::Others => OTHERS_TITLE,
        }
    }

    /// Stable identifier used by the UI as a list key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OutrageOfModesty => "1",
            Self::SnatchTheft => "2",
            Self::Robbery => "3",
            Self::Others => "4",
            Self::Housebreaking => "5",
            Self::VehicleTheft => "6",
            Self::Scam => "7",
            Self::Assault => "8",
            Self::Vandalism => "9",
        }
    }

    /// Background colour for the crime type's button and report screen.
    #[must_use]
    pub const fn display_color(self) -> &'static str {
        match self {
            Self::OutrageOfModesty => "#F44336",
            Self::SnatchTheft => "#4CAF50",
            Self::Robbery => "#2196F3",
            Self::Housebreaking => "#9C27B0",
            Self::VehicleTheft => "#FF9800",
            Self::Scam => "#795548",
            Self::Assault => "#E91E63",
            Self::Vandalism => "#607D8B",
            Self::Others => "#00BCD4",
        }
    }

    /// Opaque icon reference resolved by the UI.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::OutrageOfModesty => "outrage_of_modesty",
            Self::SnatchTheft | Self::VehicleTheft => "theft",
            Self::Robbery => "robbery",
            Self::Housebreaking => "housebreaking",
            Self::Scam => "scam",
            Self::Assault => "assault",
            Self::Vandalism => "vandalism",
            Self::Others => "others",
        }
    }

    /// Full display record for this crime type.
    #[must_use]
    pub fn crime_type(self) -> CrimeType {
        CrimeType {
            id: self.key().to_string(),
            title: self.title().to_string(),
            display_color: self.display_color().to_string(),
            icon: self.icon().to_string(),
        }
    }
}

/// A crime type as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeType {
    /// List key.
    pub id: String,
    /// Display title. The only field ranking matches consider.
    pub title: String,
    /// Hex background colour.
    pub display_color: String,
    /// Opaque icon reference.
    pub icon: String,
}

/// Returns the full local catalog in declaration order.
#[must_use]
pub fn catalog() -> Vec<CrimeType> {
    CrimeTypeId::all()
        .iter()
        .map(|id| id.crime_type())
        .collect()
}
