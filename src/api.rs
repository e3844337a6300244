//! The single blocking GET against the groups API.

use tracing::{debug, info};

use crate::error::BuildError;
use crate::model::Group;

/// Default API host, overridable for self-hosted instances and tests.
pub const DEFAULT_HOST: &str = "https://deschtimes.com";

/// Build the group endpoint URL. The access token is embedded in the
/// path, so the full URL must stay out of logs.
pub fn group_url(host: &str, token: &str) -> String {
    format!("{}/api/v1/groups/{}.json", host.trim_end_matches('/'), token)
}

/// Fetch and hydrate the group document. Blocks until the request
/// completes; transport failures and non-success statuses are fatal and
/// abort the build with no output.
pub fn fetch_group(host: &str, token: &str) -> Result<Group, BuildError> {
    let url = group_url(host, token);

    debug!(host, "requesting group document");
    let response = reqwest::blocking::get(&url)?;

    let status = response.status();
    if !status.is_success() {
        return Err(BuildError::Status { status });
    }

    let body = response.text()?;
    info!(bytes = body.len(), "group document received");
    Ok(Group::from_json(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn group_url_embeds_the_token() {
        assert_eq!(
            group_url("https://deschtimes.com", "sekrit"),
            "https://deschtimes.com/api/v1/groups/sekrit.json"
        );
    }

    #[test]
    fn group_url_tolerates_a_trailing_slash() {
        assert_eq!(
            group_url("http://localhost:3000/", "t"),
            "http://localhost:3000/api/v1/groups/t.json"
        );
    }
}
