//! Time-of-day activity analysis of push events.

use crate::api::Event;
use chrono::{TimeZone, Timelike};
use derive_more::Constructor;
use serde::Serialize;
use strum_macros::Display;

pub const HOURS_PER_DAY: usize = 24;

/// When a developer pushes most of their commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Persona {
    #[strum(serialize = "Night Owl")]
    #[serde(rename = "Night Owl")]
    NightOwl,
    #[strum(serialize = "Early Bird")]
    #[serde(rename = "Early Bird")]
    EarlyBird,
    #[strum(serialize = "Afternoon Architect")]
    #[serde(rename = "Afternoon Architect")]
    AfternoonArchitect,
    #[strum(serialize = "Evening Engineer")]
    #[serde(rename = "Evening Engineer")]
    EveningEngineer,
    #[strum(serialize = "Balanced Coder")]
    #[serde(rename = "Balanced Coder")]
    BalancedCoder,
}

/// Hour windows `[start, end)` in evaluation order.
const WINDOWS: [(usize, usize, Persona); 4] = [
    (0, 6, Persona::NightOwl),
    (6, 12, Persona::EarlyBird),
    (12, 18, Persona::AfternoonArchitect),
    (18, 24, Persona::EveningEngineer),
];

impl Persona {
    /// Persona of the window holding the most commits.
    ///
    /// On a shared maximum the last such window in night, morning, afternoon, evening
    /// order wins, so a day without commits is an evening one.
    pub fn from_hours(hours: &[u32; HOURS_PER_DAY]) -> Persona {
        let sums = WINDOWS.map(|(start, end, _)| hours[start..end].iter().sum::<u32>());
        let max = sums.iter().copied().max().unwrap_or(0);

        let mut persona = Persona::BalancedCoder;
        for ((_, _, candidate), sum) in WINDOWS.iter().zip(sums) {
            if sum == max {
                persona = *candidate;
            }
        }
        persona
    }
}

/// Commits pushed during one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Constructor)]
pub struct HourlyCommits {
    /// `"<hour>:00"`
    pub hour: String,
    pub commits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RhythmSummary {
    /// Always 24 entries, midnight first.
    pub chart_data: Vec<HourlyCommits>,
    pub persona: Persona,
    pub total_commits: u32,
}

/// Buckets push event commits by hour of the day in `tz`.
///
/// Events other than pushes are ignored.
pub fn compute_rhythm<TZ: TimeZone>(events: &[Event], tz: &TZ) -> RhythmSummary {
    let mut hours = [0u32; HOURS_PER_DAY];
    let mut total_commits = 0u32;

    for event in events.iter().filter(|event| event.is_push()) {
        let hour = event.created_at.with_timezone(tz).hour() as usize;
        let commits = event.commit_count();
        hours[hour] = hours[hour].saturating_add(commits);
        total_commits = total_commits.saturating_add(commits);
    }

    let chart_data = hours
        .iter()
        .enumerate()
        .map(|(hour, commits)| HourlyCommits::new(format!("{}:00", hour), *commits))
        .collect();

    RhythmSummary {
        chart_data,
        persona: Persona::from_hours(&hours),
        total_commits,
    }
}

// Tests

#[cfg(test)]
use crate::api::{Commit, EventPayload, PUSH_EVENT};
#[cfg(test)]
use chrono::{FixedOffset, Utc};

#[cfg(test)]
fn event(kind: &str, created_at: &str, commits: Option<usize>) -> Event {
    Event {
        kind: kind.to_string(),
        created_at: created_at.parse().unwrap(),
        payload: EventPayload {
            commits: commits.map(|n| (0..n).map(|i| Commit::new(i.to_string(), String::new())).collect()),
        },
    }
}

#[cfg(test)]
fn commits_per_hour(rhythm: &RhythmSummary) -> Vec<u32> {
    rhythm.chart_data.iter().map(|h| h.commits).collect()
}

#[test]
fn compute_rhythm_night_owl_test() {
    let events = vec![
        event(PUSH_EVENT, "2023-10-15T02:00:00Z", Some(2)),
        event(PUSH_EVENT, "2023-10-16T03:30:00Z", Some(1)),
    ];
    let rhythm = compute_rhythm(&events, &Utc);
    assert_eq!(rhythm.total_commits, 3);
    assert_eq!(rhythm.chart_data.len(), HOURS_PER_DAY);
    assert_eq!(rhythm.chart_data[2], HourlyCommits::new("2:00".to_string(), 2));
    assert_eq!(rhythm.chart_data[3], HourlyCommits::new("3:00".to_string(), 1));
    assert_eq!(rhythm.persona, Persona::NightOwl);
    assert_eq!(rhythm.persona.to_string(), "Night Owl");
}

#[test]
fn compute_rhythm_empty_test() {
    let rhythm = compute_rhythm(&[], &Utc);
    assert_eq!(rhythm.total_commits, 0);
    assert_eq!(commits_per_hour(&rhythm), vec![0; HOURS_PER_DAY]);
    assert_eq!(rhythm.chart_data[0].hour, "0:00");
    assert_eq!(rhythm.chart_data[23].hour, "23:00");
    assert_eq!(rhythm.persona, Persona::EveningEngineer);
}

#[test]
fn compute_rhythm_ignores_other_events_test() {
    let events = vec![
        event("WatchEvent", "2023-10-15T09:00:00Z", None),
        event("CreateEvent", "2023-10-15T09:00:00Z", Some(4)),
        event(PUSH_EVENT, "2023-10-15T14:10:00Z", None),
        event(PUSH_EVENT, "2023-10-15T15:10:00Z", Some(0)),
    ];
    let rhythm = compute_rhythm(&events, &Utc);
    assert_eq!(rhythm.total_commits, 2);
    assert_eq!(rhythm.chart_data[9].commits, 0);
    assert_eq!(rhythm.persona, Persona::AfternoonArchitect);
}

#[test]
fn compute_rhythm_uses_given_time_zone_test() {
    let events = vec![event(PUSH_EVENT, "2023-10-15T22:30:00Z", Some(3))];
    let warsaw_summer = FixedOffset::east_opt(2 * 3600).unwrap();
    let rhythm = compute_rhythm(&events, &warsaw_summer);
    assert_eq!(rhythm.chart_data[0].commits, 3);
    assert_eq!(rhythm.persona, Persona::NightOwl);

    let rhythm = compute_rhythm(&events, &Utc);
    assert_eq!(rhythm.chart_data[22].commits, 3);
    assert_eq!(rhythm.persona, Persona::EveningEngineer);
}

#[test]
fn persona_tie_goes_to_later_window_test() {
    let mut hours = [0; HOURS_PER_DAY];
    hours[1] = 4;
    hours[7] = 4;
    assert_eq!(Persona::from_hours(&hours), Persona::EarlyBird);

    hours[13] = 4;
    assert_eq!(Persona::from_hours(&hours), Persona::AfternoonArchitect);

    hours[20] = 1;
    hours[21] = 3;
    assert_eq!(Persona::from_hours(&hours), Persona::EveningEngineer);

    hours[5] = 1;
    assert_eq!(Persona::from_hours(&hours), Persona::NightOwl);
}

#[test]
fn compute_rhythm_is_repeatable_test() {
    let events = vec![
        event(PUSH_EVENT, "2023-10-15T08:00:00Z", Some(5)),
        event(PUSH_EVENT, "2023-10-15T19:00:00Z", Some(5)),
    ];
    assert_eq!(compute_rhythm(&events, &Utc), compute_rhythm(&events, &Utc));
}
