use crate::api::Profile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;

const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.25;

/// Overall contribution profile of a developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum DeveloperClass {
    #[strum(serialize = "Open Source Legend")]
    #[serde(rename = "Open Source Legend")]
    OpenSourceLegend,
    #[strum(serialize = "Veteran Architect")]
    #[serde(rename = "Veteran Architect")]
    VeteranArchitect,
    #[strum(serialize = "Rising Star")]
    #[serde(rename = "Rising Star")]
    RisingStar,
    #[strum(serialize = "Prolific Creator")]
    #[serde(rename = "Prolific Creator")]
    ProlificCreator,
    #[strum(serialize = "Active Contributor")]
    #[serde(rename = "Active Contributor")]
    ActiveContributor,
    #[strum(serialize = "Promising Initiate")]
    #[serde(rename = "Promising Initiate")]
    PromisingInitiate,
    #[strum(serialize = "Dedicated Developer")]
    #[serde(rename = "Dedicated Developer")]
    DedicatedDeveloper,
}

struct Facts {
    total_stars: u64,
    total_commits: u32,
    public_repos: u32,
    account_age_years: f64,
}

/// Evaluated top to bottom, first match wins.
const RULES: [(fn(&Facts) -> bool, DeveloperClass); 6] = [
    (|f| f.total_stars > 1000, DeveloperClass::OpenSourceLegend),
    (
        |f| f.total_stars > 100 && f.account_age_years > 3.0,
        DeveloperClass::VeteranArchitect,
    ),
    (|f| f.total_stars > 50, DeveloperClass::RisingStar),
    (|f| f.public_repos > 50, DeveloperClass::ProlificCreator),
    (|f| f.total_commits > 50, DeveloperClass::ActiveContributor),
    (|f| f.account_age_years < 1.0, DeveloperClass::PromisingInitiate),
];

/// Classifies a developer as of now.
pub fn classify_developer(profile: &Profile, total_stars: u64, total_commits: u32) -> DeveloperClass {
    classify_developer_at(profile, total_stars, total_commits, Utc::now())
}

/// Classifies a developer as of `now`.
///
/// A creation date in the future gives a negative account age, which is used as is.
pub fn classify_developer_at(
    profile: &Profile,
    total_stars: u64,
    total_commits: u32,
    now: DateTime<Utc>,
) -> DeveloperClass {
    let facts = Facts {
        total_stars,
        total_commits,
        public_repos: profile.public_repos,
        account_age_years: account_age_years(profile.created_at, now),
    };
    RULES
        .iter()
        .find(|(matches, _)| matches(&facts))
        .map(|(_, class)| *class)
        .unwrap_or(DeveloperClass::DedicatedDeveloper)
}

/// Years elapsed since `created_at`, counting 365.25 days a year.
pub fn account_age_years(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - created_at).num_milliseconds() as f64 / MILLIS_PER_YEAR
}

// Tests

#[cfg(test)]
fn profile(created_at: &str, public_repos: u32) -> Profile {
    Profile {
        login: "octocat".to_string(),
        name: None,
        avatar_url: None,
        html_url: None,
        bio: None,
        location: None,
        company: None,
        blog: None,
        followers: 0,
        public_repos,
        created_at: created_at.parse().unwrap(),
    }
}

#[cfg(test)]
fn at(timestamp: &str) -> DateTime<Utc> {
    timestamp.parse().unwrap()
}

#[test]
fn open_source_legend_test() {
    let profile = profile("2015-01-01T00:00:00Z", 100);
    assert_eq!(classify_developer(&profile, 1500, 500), DeveloperClass::OpenSourceLegend);
    assert_eq!(classify_developer(&profile, 1500, 500).to_string(), "Open Source Legend");
}

#[test]
fn promising_initiate_test() {
    let profile = Profile {
        created_at: Utc::now(),
        ..profile("2015-01-01T00:00:00Z", 2)
    };
    assert_eq!(classify_developer(&profile, 2, 5), DeveloperClass::PromisingInitiate);
}

#[test]
fn first_matching_rule_wins_test() {
    let now = at("2024-06-01T00:00:00Z");
    let veteran = profile("2019-01-01T00:00:00Z", 80);
    let newcomer = profile("2024-01-01T00:00:00Z", 80);

    assert_eq!(
        classify_developer_at(&veteran, 101, 100, now),
        DeveloperClass::VeteranArchitect
    );
    assert_eq!(classify_developer_at(&newcomer, 101, 100, now), DeveloperClass::RisingStar);
    assert_eq!(classify_developer_at(&veteran, 51, 100, now), DeveloperClass::RisingStar);
    assert_eq!(classify_developer_at(&newcomer, 50, 100, now), DeveloperClass::ProlificCreator);

    let few_repos = profile("2024-01-01T00:00:00Z", 50);
    assert_eq!(
        classify_developer_at(&few_repos, 0, 51, now),
        DeveloperClass::ActiveContributor
    );
    assert_eq!(
        classify_developer_at(&few_repos, 0, 50, now),
        DeveloperClass::PromisingInitiate
    );

    let seasoned = profile("2020-01-01T00:00:00Z", 10);
    assert_eq!(
        classify_developer_at(&seasoned, 0, 0, now),
        DeveloperClass::DedicatedDeveloper
    );
}

#[test]
fn future_creation_date_test() {
    let now = at("2024-06-01T00:00:00Z");
    let profile = profile("2030-01-01T00:00:00Z", 1);
    assert!(account_age_years(profile.created_at, now) < 0.0);
    assert_eq!(
        classify_developer_at(&profile, 0, 0, now),
        DeveloperClass::PromisingInitiate
    );
}

#[test]
fn account_age_years_test() {
    let age = account_age_years(at("2020-01-01T00:00:00Z"), at("2024-01-01T00:00:00Z"));
    assert!((age - 1461.0 / 365.25).abs() < 1e-9);
    assert_eq!(age, 4.0);
}
