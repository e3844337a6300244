//! Error taxonomy for the status page build.
//!
//! Every variant is fatal: the build is a one-shot batch run with no
//! partial-output mode, so errors propagate straight to the process
//! boundary and the scheduler re-runs the whole build.

use thiserror::Error;

use crate::model::ConstructionError;

#[derive(Debug, Error)]
pub enum BuildError {
    /// Required environment variable missing. Raised before any network
    /// call is attempted.
    #[error("environment variable {name} is not set")]
    Config { name: &'static str },

    /// The group request failed at the transport level.
    #[error("group request failed")]
    Network(#[from] reqwest::Error),

    /// The group request completed with a non-success status.
    #[error("group request returned {status}")]
    Status { status: reqwest::StatusCode },

    /// The payload did not satisfy the data model.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Writing the assembled page to the output stream failed.
    #[error("writing the rendered page failed")]
    Render(#[source] std::io::Error),
}

impl BuildError {
    /// True for failures of the fetch itself, transport or status.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { .. })
    }

    /// True when the payload was received but could not be hydrated.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }
}
