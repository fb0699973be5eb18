//! Fish and plant species tables.
//!
//! Species are closed enumerations with their biological constants attached
//! as `const fn` lookups. External callers refer to a species by its stable
//! `snake_case` key (see [`FishSpecies::from_key`]); unknown keys are
//! rejected by the action layer rather than panicking.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Biological sex of a fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum FishSex {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// A fish species that can be stocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FishSpecies {
    /// Paracheirodon innesi.
    NeonTetra,
    /// Poecilia reticulata.
    Guppy,
    /// Danio rerio.
    ZebraDanio,
    /// Corydoras aeneus.
    Corydoras,
    /// Betta splendens.
    Betta,
    /// Pterophyllum scalare.
    Angelfish,
}

impl FishSpecies {
    /// Every stockable fish species.
    pub const ALL: [Self; 6] = [
        Self::NeonTetra,
        Self::Guppy,
        Self::ZebraDanio,
        Self::Corydoras,
        Self::Betta,
        Self::Angelfish,
    ];

    /// Stable key used by actions and save files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::NeonTetra => "neon_tetra",
            Self::Guppy => "guppy",
            Self::ZebraDanio => "zebra_danio",
            Self::Corydoras => "corydoras",
            Self::Betta => "betta",
            Self::Angelfish => "angelfish",
        }
    }

    /// Look up a species by its key. Returns `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Human-readable common name.
    pub const fn common_name(self) -> &'static str {
        match self {
            Self::NeonTetra => "Neon Tetra",
            Self::Guppy => "Guppy",
            Self::ZebraDanio => "Zebra Danio",
            Self::Corydoras => "Bronze Corydoras",
            Self::Betta => "Betta",
            Self::Angelfish => "Angelfish",
        }
    }

    /// Adult body mass in grams.
    pub const fn adult_mass(self) -> f64 {
        match self {
            Self::NeonTetra => 0.5,
            Self::Guppy => 0.75,
            Self::ZebraDanio => 1.0,
            Self::Corydoras => 3.0,
            Self::Betta => 3.5,
            Self::Angelfish => 15.0,
        }
    }

    /// Comfortable temperature range `(min, max)` in °C.
    pub const fn temperature_range(self) -> (f64, f64) {
        match self {
            Self::NeonTetra => (20.0, 28.0),
            Self::Guppy => (22.0, 28.0),
            Self::ZebraDanio => (18.0, 26.0),
            Self::Corydoras => (22.0, 26.0),
            Self::Betta => (24.0, 30.0),
            Self::Angelfish => (24.0, 30.0),
        }
    }
}

/// A plant species that can be planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PlantSpecies {
    /// Microsorum pteropus.
    JavaFern,
    /// Anubias barteri.
    Anubias,
    /// Echinodorus grisebachii.
    AmazonSword,
    /// Ceratophyllum demersum.
    Hornwort,
    /// Cryptocoryne wendtii.
    Cryptocoryne,
    /// Taxiphyllum barbieri.
    JavaMoss,
}

impl PlantSpecies {
    /// Every plantable species.
    pub const ALL: [Self; 6] = [
        Self::JavaFern,
        Self::Anubias,
        Self::AmazonSword,
        Self::Hornwort,
        Self::Cryptocoryne,
        Self::JavaMoss,
    ];

    /// Stable key used by actions and save files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::JavaFern => "java_fern",
            Self::Anubias => "anubias",
            Self::AmazonSword => "amazon_sword",
            Self::Hornwort => "hornwort",
            Self::Cryptocoryne => "cryptocoryne",
            Self::JavaMoss => "java_moss",
        }
    }

    /// Look up a species by its key. Returns `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Human-readable common name.
    pub const fn common_name(self) -> &'static str {
        match self {
            Self::JavaFern => "Java Fern",
            Self::Anubias => "Anubias",
            Self::AmazonSword => "Amazon Sword",
            Self::Hornwort => "Hornwort",
            Self::Cryptocoryne => "Cryptocoryne",
            Self::JavaMoss => "Java Moss",
        }
    }

    /// Relative growth rate used to split photosynthetic biomass.
    pub const fn growth_rate(self) -> f64 {
        match self {
            Self::Anubias => 0.3,
            Self::JavaFern => 0.5,
            Self::Cryptocoryne => 0.6,
            Self::JavaMoss => 0.8,
            Self::AmazonSword => 1.0,
            Self::Hornwort => 1.5,
        }
    }

    /// Maximum size in percent before growth turns into waste.
    pub const fn max_size(self) -> f64 {
        match self {
            Self::Anubias | Self::JavaFern | Self::Cryptocoryne => 150.0,
            Self::JavaMoss | Self::AmazonSword | Self::Hornwort => 200.0,
        }
    }
}
