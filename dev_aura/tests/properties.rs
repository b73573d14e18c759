//! Property-based tests of the aggregations.
//!
//! These tests check invariants which hold for any repository or event list.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use dev_aura::api::{Commit, Event, EventPayload, Repository, PUSH_EVENT};
use dev_aura::{compute_rhythm, summarize_impact, summarize_languages, HOURS_PER_DAY, MOST_STARRED_LIMIT};
use proptest::prelude::*;
use std::collections::HashSet;

/// Strategy for repositories with optional language, stars and forks.
fn repository() -> impl Strategy<Value = Repository> {
    (
        prop::option::of(prop_oneof![Just("Rust"), Just("Go"), Just("go"), Just("TypeScript"), Just("C")]),
        prop::option::of(0u64..5_000),
        prop::option::of(0u64..1_000),
    )
        .prop_map(|(language, stars, forks)| Repository {
            id: 0,
            name: String::new(),
            html_url: String::new(),
            description: None,
            language: language.map(str::to_string),
            stargazers_count: stars,
            forks_count: forks,
            fork: false,
            archived: false,
        })
}

/// Strategy for repository lists with unique ids.
fn repositories() -> impl Strategy<Value = Vec<Repository>> {
    prop::collection::vec(repository(), 0..40).prop_map(|mut repos| {
        for (i, repo) in repos.iter_mut().enumerate() {
            repo.id = i as u64;
            repo.name = format!("repo{}", i);
            repo.html_url = format!("https://github.com/octocat/repo{}", i);
        }
        repos
    })
}

/// Strategy for events of mixed types, timestamps within 2020-2025.
fn event() -> impl Strategy<Value = Event> {
    (
        prop_oneof![Just(PUSH_EVENT), Just("WatchEvent"), Just("IssuesEvent")],
        1_577_836_800i64..1_735_689_600i64,
        prop::option::of(0usize..25),
    )
        .prop_map(|(kind, timestamp, commits)| Event {
            kind: kind.to_string(),
            created_at: Utc.timestamp_opt(timestamp, 0).unwrap(),
            payload: EventPayload {
                commits: commits.map(|n| (0..n).map(|i| Commit::new(i.to_string(), String::new())).collect()),
            },
        })
}

proptest! {
    #[test]
    fn languages_cover_every_language_once(repos in repositories()) {
        let summaries = summarize_languages(&repos);

        let distinct: HashSet<&str> = repos.iter().filter_map(|r| r.language.as_deref()).collect();
        prop_assert_eq!(summaries.len(), distinct.len());

        let with_language = repos.iter().filter(|r| r.language.is_some()).count() as u32;
        prop_assert_eq!(summaries.iter().map(|s| s.count).sum::<u32>(), with_language);
    }

    #[test]
    fn languages_are_weighted_and_sorted(repos in repositories()) {
        let summaries = summarize_languages(&repos);
        for summary in &summaries {
            prop_assert_eq!(summary.weight, summary.count as f64 + 0.5 * summary.stars as f64);
        }
        for pair in summaries.windows(2) {
            prop_assert!(pair[0].weight >= pair[1].weight);
        }
        prop_assert_eq!(summaries, summarize_languages(&repos));
    }

    #[test]
    fn impact_totals_and_most_starred(repos in repositories()) {
        let impact = summarize_impact(&repos);

        prop_assert_eq!(impact.total_stars, repos.iter().map(|r| r.stargazers_count.unwrap_or(0)).sum::<u64>());
        prop_assert_eq!(impact.total_forks, repos.iter().map(|r| r.forks_count.unwrap_or(0)).sum::<u64>());
        prop_assert_eq!(impact.most_starred.len(), repos.len().min(MOST_STARRED_LIMIT));
        for pair in impact.most_starred.windows(2) {
            prop_assert!(pair[0].stars() >= pair[1].stars());
        }
        // nothing outside the list has more stars than its last entry
        if let Some(last) = impact.most_starred.last() {
            let listed: HashSet<u64> = impact.most_starred.iter().map(|r| r.id).collect();
            prop_assert!(repos.iter().filter(|r| !listed.contains(&r.id)).all(|r| r.stars() <= last.stars()));
        }
        prop_assert_eq!(impact, summarize_impact(&repos));
    }

    #[test]
    fn rhythm_buckets_add_up(events in prop::collection::vec(event(), 0..60), offset_hours in -12i32..=14) {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let rhythm = compute_rhythm(&events, &tz);

        prop_assert_eq!(rhythm.chart_data.len(), HOURS_PER_DAY);
        for (hour, bucket) in rhythm.chart_data.iter().enumerate() {
            prop_assert_eq!(&bucket.hour, &format!("{}:00", hour));
        }
        prop_assert_eq!(rhythm.total_commits, rhythm.chart_data.iter().map(|h| h.commits).sum::<u32>());

        let pushes = events.iter().filter(|e| e.kind == PUSH_EVENT);
        let expected: u32 = pushes.map(|e| e.payload.commits.as_ref().map_or(1, |c| c.len().max(1) as u32)).sum();
        prop_assert_eq!(rhythm.total_commits, expected);
        prop_assert_eq!(rhythm, compute_rhythm(&events, &tz));
    }

    #[test]
    fn rhythm_bucket_matches_local_hour(timestamp in 1_577_836_800i64..1_735_689_600i64, offset_hours in -12i32..=14) {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let created_at: DateTime<Utc> = Utc.timestamp_opt(timestamp, 0).unwrap();
        let event = Event { kind: PUSH_EVENT.to_string(), created_at, payload: EventPayload::default() };
        let rhythm = compute_rhythm(&[event], &tz);

        let local_hour = ((timestamp + offset_hours as i64 * 3600).rem_euclid(86_400) / 3600) as usize;
        prop_assert_eq!(rhythm.chart_data[local_hour].commits, 1);
    }
}
