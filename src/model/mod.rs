//! Data model: raw payload shapes + the typed owning tree.
//!
//! The group payload hydrates bottom-up into
//! `Group → Show → Episode → Staff → Position`, each node exclusively
//! owning its children. The tree is built once per run and never mutated
//! afterwards.
//!
//! Child constructors take a tagged source (`Raw` record or already-typed
//! `Node`) so hydration is idempotent: running construction over a tree
//! that is already typed passes every node through unchanged.

pub mod raw;

pub use raw::{RawEpisode, RawGroup, RawPosition, RawShow, RawStaff};

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("missing required field `{field}` on {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// Raised for unparseable strings and for offset-naive timestamps
    /// alike; a timestamp without an offset never enters the tree.
    #[error("invalid timestamp {value:?} in `{field}` on {entity}")]
    Timestamp {
        entity: &'static str,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("group payload is not valid JSON")]
    Decode(#[from] serde_json::Error),
}

/// Top-level collection of tracked shows returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub acronym: String,
    pub icon_url: String,
    pub shows: Vec<Show>,
}

/// A tracked media title with an ordered list of episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    pub id: u64,
    pub name: String,
    /// Empty string when the payload carried no status.
    pub status: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub poster_url: String,
    pub episodes: Vec<Episode>,
}

/// A single installment of a show.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub id: u64,
    /// Fractional for specials, e.g. 7.5.
    pub number: f64,
    pub released: bool,
    pub air_date: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub season: String,
    pub staff: Vec<Staff>,
}

/// A role assignment on an episode with a completion flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    pub id: u64,
    pub finished: bool,
    pub updated_at: DateTime<FixedOffset>,
    /// Exclusively owned, even when two assignments name the same role.
    pub position: Position,
}

/// A named role identified by a short acronym.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub id: u64,
    pub name: String,
    pub acronym: String,
}

/// Input to a child constructor: a raw record still to be hydrated, or a
/// node that is already typed and passes through unchanged.
#[derive(Debug, Clone)]
pub enum ShowSource {
    Raw(RawShow),
    Node(Show),
}

#[derive(Debug, Clone)]
pub enum EpisodeSource {
    Raw(RawEpisode),
    Node(Episode),
}

#[derive(Debug, Clone)]
pub enum StaffSource {
    Raw(RawStaff),
    Node(Staff),
}

#[derive(Debug, Clone)]
pub enum PositionSource {
    Raw(RawPosition),
    Node(Position),
}

macro_rules! source_from {
    ($source:ident, $raw:ident, $node:ident) => {
        impl From<$raw> for $source {
            fn from(raw: $raw) -> Self {
                Self::Raw(raw)
            }
        }

        impl From<$node> for $source {
            fn from(node: $node) -> Self {
                Self::Node(node)
            }
        }
    };
}

source_from!(ShowSource, RawShow, Show);
source_from!(EpisodeSource, RawEpisode, Episode);
source_from!(StaffSource, RawStaff, Staff);
source_from!(PositionSource, RawPosition, Position);

impl Group {
    /// Decode and hydrate a group payload in one step.
    pub fn from_json(text: &str) -> Result<Self, ConstructionError> {
        let raw: RawGroup = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawGroup) -> Result<Self, ConstructionError> {
        Self::new(
            require(raw.id, "group", "id")?,
            require(raw.name, "group", "name")?,
            require(raw.acronym, "group", "acronym")?,
            require(raw.icon, "group", "icon")?,
            raw.shows.into_iter().map(ShowSource::from).collect(),
        )
    }

    /// Construct from parts. Show sources may mix raw records and typed
    /// nodes from an earlier construction.
    pub fn new(
        id: u64,
        name: String,
        acronym: String,
        icon_url: String,
        shows: Vec<ShowSource>,
    ) -> Result<Self, ConstructionError> {
        // The group name becomes the top-level report heading and must
        // not be empty.
        if name.is_empty() {
            return Err(ConstructionError::MissingField {
                entity: "group",
                field: "name",
            });
        }

        let shows = shows
            .into_iter()
            .map(Show::from_source)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name,
            acronym,
            icon_url,
            shows,
        })
    }
}

impl Show {
    pub fn from_source(source: ShowSource) -> Result<Self, ConstructionError> {
        match source {
            ShowSource::Node(show) => Ok(show),
            ShowSource::Raw(raw) => Self::from_raw(raw),
        }
    }

    pub fn from_raw(raw: RawShow) -> Result<Self, ConstructionError> {
        let episodes = raw
            .episodes
            .into_iter()
            .map(|episode| Episode::from_source(episode.into()))
            .collect::<Result<Vec<_>, _>>()?;

        let created_at = require(raw.created_at, "show", "created_at")?;
        let updated_at = require(raw.updated_at, "show", "updated_at")?;

        Ok(Self {
            id: require(raw.id, "show", "id")?,
            name: require(raw.name, "show", "name")?,
            status: raw.status.unwrap_or_default(),
            created_at: parse_timestamp(created_at, "show", "created_at")?,
            updated_at: parse_timestamp(updated_at, "show", "updated_at")?,
            poster_url: require(raw.poster, "show", "poster")?,
            episodes,
        })
    }

    /// A show is complete when its status text reads exactly "Complete".
    pub fn is_complete(&self) -> bool {
        self.status == "Complete"
    }
}

impl Episode {
    pub fn from_source(source: EpisodeSource) -> Result<Self, ConstructionError> {
        match source {
            EpisodeSource::Node(episode) => Ok(episode),
            EpisodeSource::Raw(raw) => Self::from_raw(raw),
        }
    }

    pub fn from_raw(raw: RawEpisode) -> Result<Self, ConstructionError> {
        let staff = raw
            .staff
            .into_iter()
            .map(|staff| Staff::from_source(staff.into()))
            .collect::<Result<Vec<_>, _>>()?;

        let air_date = require(raw.air_date, "episode", "air_date")?;
        let updated_at = require(raw.updated_at, "episode", "updated_at")?;

        Ok(Self {
            id: require(raw.id, "episode", "id")?,
            number: require(raw.number, "episode", "number")?,
            released: require(raw.released, "episode", "released")?,
            air_date: parse_timestamp(air_date, "episode", "air_date")?,
            updated_at: parse_timestamp(updated_at, "episode", "updated_at")?,
            season: require(raw.season, "episode", "season")?,
            staff,
        })
    }
}

impl Staff {
    pub fn from_source(source: StaffSource) -> Result<Self, ConstructionError> {
        match source {
            StaffSource::Node(staff) => Ok(staff),
            StaffSource::Raw(raw) => Self::from_raw(raw),
        }
    }

    pub fn from_raw(raw: RawStaff) -> Result<Self, ConstructionError> {
        let position = require(raw.position, "staff", "position")?;
        let updated_at = require(raw.updated_at, "staff", "updated_at")?;

        Ok(Self {
            id: require(raw.id, "staff", "id")?,
            finished: require(raw.finished, "staff", "finished")?,
            updated_at: parse_timestamp(updated_at, "staff", "updated_at")?,
            position: Position::from_source(position.into())?,
        })
    }
}

impl Position {
    pub fn from_source(source: PositionSource) -> Result<Self, ConstructionError> {
        match source {
            PositionSource::Node(position) => Ok(position),
            PositionSource::Raw(raw) => Self::from_raw(raw),
        }
    }

    pub fn from_raw(raw: RawPosition) -> Result<Self, ConstructionError> {
        Ok(Self {
            id: require(raw.id, "position", "id")?,
            name: require(raw.name, "position", "name")?,
            acronym: require(raw.acronym, "position", "acronym")?,
        })
    }
}

fn require<T>(
    value: Option<T>,
    entity: &'static str,
    field: &'static str,
) -> Result<T, ConstructionError> {
    value.ok_or(ConstructionError::MissingField { entity, field })
}

/// RFC 3339 is the one ISO-8601 profile accepted everywhere in this
/// crate; it requires an explicit offset, so naive strings fail here.
fn parse_timestamp(
    value: String,
    entity: &'static str,
    field: &'static str,
) -> Result<DateTime<FixedOffset>, ConstructionError> {
    DateTime::parse_from_rfc3339(&value).map_err(|source| ConstructionError::Timestamp {
        entity,
        field,
        value,
        source,
    })
}
