//! Report pipeline: filter, sort and aggregate the group tree into the
//! Markdown status document.
//!
//! The pipeline never fails: every field it touches was validated when
//! the tree was constructed. The buffer is assembled in full and handed
//! to the renderer once.

use chrono::{DateTime, FixedOffset, Utc};

use crate::model::{Episode, Group, Show};

/// Build the Markdown status document for a group at `build_time`.
pub fn build_report(group: &Group, build_time: DateTime<Utc>) -> String {
    let mut buffer = String::new();
    buffer.push_str(&format!("# {}\n", group.name));

    // Incomplete shows only, most recently updated first. The sort is
    // stable, so shows updated at the same instant keep fetch order.
    let mut pending: Vec<&Show> = group
        .shows
        .iter()
        .filter(|show| !show.is_complete())
        .collect();
    pending.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    for show in pending {
        buffer.push_str(&format!("## {}\n", show.name));
        buffer.push_str(&format!("- Updated {}\n", time_tag(show.updated_at)));

        // Only the next episode due is reported; any further overdue
        // episodes wait for a later build.
        if let Some(episode) = next_due(show, build_time) {
            buffer.push_str(&format!("- Episode {}\n", episode.number));
            buffer.push_str(&format!("- Aired {}\n", time_tag(episode.air_date)));
            buffer.push_str(&format!("- @ {}\n\n", outstanding_positions(episode)));
        }
    }

    buffer
}

/// First episode that has aired at or before `build_time` and is not yet
/// released, in payload order.
fn next_due(show: &Show, build_time: DateTime<Utc>) -> Option<&Episode> {
    show.episodes
        .iter()
        .filter(|episode| episode.air_date <= build_time)
        .find(|episode| !episode.released)
}

/// Acronyms of unfinished assignments, payload order, each in its own
/// code span.
fn outstanding_positions(episode: &Episode) -> String {
    let acronyms: Vec<&str> = episode
        .staff
        .iter()
        .filter(|staff| !staff.finished)
        .map(|staff| staff.position.acronym.as_str())
        .collect();

    format!("`{}`", acronyms.join("`, `"))
}

/// Render an instant as a `<time>` tag; attribute and visible text carry
/// the same RFC 3339 string.
fn time_tag(instant: DateTime<FixedOffset>) -> String {
    let stamp = instant.to_rfc3339();
    format!("<time datetime=\"{stamp}\">{stamp}</time>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position, Staff};
    use pretty_assertions::assert_eq;

    fn ts(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn build_time() -> DateTime<Utc> {
        "2024-01-10T00:00:00Z".parse().unwrap()
    }

    fn staff(acronym: &str, finished: bool) -> Staff {
        Staff {
            id: 1,
            finished,
            updated_at: ts("2024-01-06T00:00:00+00:00"),
            position: Position {
                id: 1,
                name: acronym.to_string(),
                acronym: acronym.to_string(),
            },
        }
    }

    fn episode(number: f64, released: bool, air_date: &str, staff: Vec<Staff>) -> Episode {
        Episode {
            id: 1,
            number,
            released,
            air_date: ts(air_date),
            updated_at: ts("2024-01-06T00:00:00+00:00"),
            season: "Winter 2024".to_string(),
            staff,
        }
    }

    fn show(name: &str, status: &str, updated_at: &str, episodes: Vec<Episode>) -> Show {
        Show {
            id: 1,
            name: name.to_string(),
            status: status.to_string(),
            created_at: ts("2023-10-01T00:00:00+00:00"),
            updated_at: ts(updated_at),
            poster_url: "poster".to_string(),
            episodes,
        }
    }

    fn group(shows: Vec<Show>) -> Group {
        Group {
            id: 1,
            name: "Good Subs".to_string(),
            acronym: "GS".to_string(),
            icon_url: "icon".to_string(),
            shows,
        }
    }

    #[test]
    fn empty_group_renders_heading_only() {
        let report = build_report(&group(vec![]), build_time());
        assert_eq!(report, "# Good Subs\n");
    }

    #[test]
    fn complete_shows_never_appear() {
        let qualifying = episode(1.0, false, "2024-01-05T00:00:00+00:00", vec![]);
        let g = group(vec![show(
            "Done Show",
            "Complete",
            "2024-01-09T00:00:00+00:00",
            vec![qualifying],
        )]);

        let report = build_report(&g, build_time());
        assert_eq!(report, "# Good Subs\n");
    }

    #[test]
    fn shows_sorted_by_update_recency() {
        let g = group(vec![
            show("Oldest", "Airing", "2024-01-01T00:00:00+00:00", vec![]),
            show("Newest", "Airing", "2024-01-09T00:00:00+00:00", vec![]),
            show("Middle", "Airing", "2024-01-05T00:00:00+00:00", vec![]),
        ]);

        let report = build_report(&g, build_time());
        let newest = report.find("## Newest").unwrap();
        let middle = report.find("## Middle").unwrap();
        let oldest = report.find("## Oldest").unwrap();
        assert!(newest < middle && middle < oldest);
    }

    #[test]
    fn equal_update_instants_keep_fetch_order() {
        let g = group(vec![
            show("First", "Airing", "2024-01-05T00:00:00+00:00", vec![]),
            show("Second", "Airing", "2024-01-05T00:00:00+00:00", vec![]),
        ]);

        let report = build_report(&g, build_time());
        assert!(report.find("## First").unwrap() < report.find("## Second").unwrap());
    }

    #[test]
    fn show_without_qualifying_episode_keeps_heading() {
        let unaired = episode(2.0, false, "2024-02-01T00:00:00+00:00", vec![]);
        let released = episode(1.0, true, "2024-01-01T00:00:00+00:00", vec![]);
        let g = group(vec![show(
            "Waiting",
            "Airing",
            "2024-01-09T00:00:00+00:00",
            vec![released, unaired],
        )]);

        let report = build_report(&g, build_time());
        assert!(report.contains("## Waiting"));
        assert!(report.contains("- Updated "));
        assert!(!report.contains("- Episode "));
    }

    #[test]
    fn only_first_qualifying_episode_is_reported() {
        let g = group(vec![show(
            "Behind",
            "Airing",
            "2024-01-09T00:00:00+00:00",
            vec![
                episode(3.0, false, "2024-01-02T00:00:00+00:00", vec![]),
                episode(4.0, false, "2024-01-09T00:00:00+00:00", vec![]),
            ],
        )]);

        let report = build_report(&g, build_time());
        assert!(report.contains("- Episode 3\n"));
        assert!(!report.contains("- Episode 4"));
    }

    #[test]
    fn episode_airing_exactly_at_build_time_counts_as_aired() {
        let g = group(vec![show(
            "Edge",
            "Airing",
            "2024-01-09T00:00:00+00:00",
            vec![episode(5.0, false, "2024-01-10T00:00:00+00:00", vec![])],
        )]);

        let report = build_report(&g, build_time());
        assert!(report.contains("- Episode 5"));
    }

    #[test]
    fn fractional_episode_numbers_render_as_given() {
        let g = group(vec![show(
            "Specials",
            "Airing",
            "2024-01-09T00:00:00+00:00",
            vec![episode(7.5, false, "2024-01-05T00:00:00+00:00", vec![])],
        )]);

        let report = build_report(&g, build_time());
        assert!(report.contains("- Episode 7.5\n"));
    }

    #[test]
    fn unfinished_positions_listed_in_original_order() {
        let g = group(vec![show(
            "Staffed",
            "Airing",
            "2024-01-09T00:00:00+00:00",
            vec![episode(
                2.0,
                false,
                "2024-01-05T00:00:00+00:00",
                vec![staff("TL", true), staff("QC", false), staff("ED", false)],
            )],
        )]);

        let report = build_report(&g, build_time());
        assert!(report.contains("- @ `QC`, `ED`\n"));
        assert!(!report.contains("TL"));
    }

    #[test]
    fn all_positions_finished_renders_empty_span() {
        let g = group(vec![show(
            "Caught Up",
            "Airing",
            "2024-01-09T00:00:00+00:00",
            vec![episode(
                2.0,
                false,
                "2024-01-05T00:00:00+00:00",
                vec![staff("QC", true)],
            )],
        )]);

        let report = build_report(&g, build_time());
        assert!(report.contains("- @ ``\n"));
    }

    #[test]
    fn time_tag_attribute_matches_visible_text() {
        let g = group(vec![show(
            "Tagged",
            "Airing",
            "2024-01-09T10:00:00+09:00",
            vec![episode(1.0, false, "2024-01-05T15:30:00+09:00", vec![])],
        )]);

        let report = build_report(&g, build_time());

        let mut tags = 0;
        for chunk in report.split("<time datetime=\"").skip(1) {
            let (attribute, rest) = chunk.split_once("\">").unwrap();
            let (text, _) = rest.split_once("</time>").unwrap();
            assert_eq!(attribute, text);
            tags += 1;
        }
        assert_eq!(tags, 2);
    }

    #[test]
    fn worked_example_from_the_status_contract() {
        let g = group(vec![
            show(
                "A",
                "Airing",
                "2024-01-09T10:00:00+00:00",
                vec![episode(
                    1.0,
                    false,
                    "2024-01-05T00:00:00+00:00",
                    vec![staff("QC", false)],
                )],
            ),
            show(
                "B",
                "Complete",
                "2024-01-09T12:00:00+00:00",
                vec![episode(
                    1.0,
                    false,
                    "2024-01-05T00:00:00+00:00",
                    vec![staff("QC", false)],
                )],
            ),
        ]);

        let report = build_report(&g, build_time());
        assert!(report.contains("## A"));
        assert!(report.contains("- Episode 1\n"));
        assert!(report.contains("- @ `QC`\n"));
        assert!(!report.contains("B"));
    }
}
