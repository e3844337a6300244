//! Raw payload shapes as they appear in the group JSON.
//!
//! Required scalars are kept as `Option` here so that an absent or null
//! field surfaces as a `ConstructionError::MissingField` during
//! hydration instead of an opaque decode error. List fields default to
//! empty sequences; unknown payload fields are ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RawGroup {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub acronym: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub shows: Vec<RawShow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawShow {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    /// Nullable in the payload; hydration resolves absent/null to "".
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub poster: Option<String>,

    #[serde(default)]
    pub episodes: Vec<RawEpisode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    #[serde(default)]
    pub id: Option<u64>,

    /// Fractional for specials, e.g. 7.5.
    #[serde(default)]
    pub number: Option<f64>,

    #[serde(default)]
    pub released: Option<bool>,

    #[serde(default)]
    pub air_date: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub season: Option<String>,

    #[serde(default)]
    pub staff: Vec<RawStaff>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStaff {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub finished: Option<bool>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub position: Option<RawPosition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPosition {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub acronym: Option<String>,
}
