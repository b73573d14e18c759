use crate::api::{Client, Error, Event, Profile, Repository, Result};
use crate::classifier::{classify_developer_at, DeveloperClass};
use crate::impact::{summarize_impact, ImpactSummary};
use crate::languages::{summarize_languages, LanguageSummary};
use crate::rhythm::{compute_rhythm, RhythmSummary};
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use serde::Serialize;
use std::sync::Arc;

/// Everything presentation needs to know about a developer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInsights {
    pub profile: Profile,
    pub languages: Vec<LanguageSummary>,
    pub rhythm: RhythmSummary,
    pub impact: ImpactSummary,
    pub developer_class: DeveloperClass,
}

pub struct DeveloperAnalyzer<CLIENT>
where
    CLIENT: Client,
{
    client: Arc<CLIENT>,
}

impl<CLIENT> DeveloperAnalyzer<CLIENT>
where
    CLIENT: Client,
{
    pub fn new(client: CLIENT) -> Self {
        DeveloperAnalyzer {
            client: Arc::new(client),
        }
    }

    /// Fetches profile, repositories and events of `login` concurrently and aggregates them.
    ///
    /// Fails as soon as any of the fetches fails.
    pub async fn analyze<TZ: TimeZone>(&self, login: &str, tz: &TZ) -> Result<DeveloperInsights> {
        let login = login.trim();
        if login.is_empty() {
            return Err(Error::Config("username must not be empty".to_string()));
        }
        let (profile, repositories, events) = futures::try_join!(
            self.client.profile(login),
            self.client.repositories(login),
            self.client.events(login),
        )?;
        debug!(
            "Fetched {} repositories and {} events of {}",
            repositories.len(),
            events.len(),
            login
        );
        Ok(build_insights(profile, &repositories, &events, tz, Utc::now()))
    }
}

/// Aggregates raw developer data as of `now`.
pub fn build_insights<TZ: TimeZone>(
    profile: Profile,
    repositories: &[Repository],
    events: &[Event],
    tz: &TZ,
    now: DateTime<Utc>,
) -> DeveloperInsights {
    let languages = summarize_languages(repositories);
    let rhythm = compute_rhythm(events, tz);
    let impact = summarize_impact(repositories);
    let developer_class = classify_developer_at(&profile, impact.total_stars, rhythm.total_commits, now);
    debug!(
        "{}: {} languages, {} stars, {} commits, {}, {}",
        profile.login,
        languages.len(),
        impact.total_stars,
        rhythm.total_commits,
        rhythm.persona,
        developer_class
    );
    DeveloperInsights {
        profile,
        languages,
        rhythm,
        impact,
        developer_class,
    }
}

// Tests

#[cfg(test)]
use crate::api::{Commit, EventPayload, PUSH_EVENT};
#[cfg(test)]
use crate::rhythm::Persona;

#[cfg(test)]
struct StaticClient {
    profile: Option<Profile>,
    repositories: Vec<Repository>,
    events: Vec<Event>,
    events_error: bool,
}

#[cfg(test)]
#[async_trait::async_trait]
impl Client for StaticClient {
    async fn profile(&self, _login: &str) -> Result<Profile> {
        self.profile.clone().ok_or(Error::NotFound)
    }

    async fn repositories(&self, _login: &str) -> Result<Vec<Repository>> {
        Ok(self.repositories.clone())
    }

    async fn events(&self, _login: &str) -> Result<Vec<Event>> {
        if self.events_error {
            return Err(Error::RateLimited);
        }
        Ok(self.events.clone())
    }
}

#[cfg(test)]
fn sample_client() -> StaticClient {
    let profile = Profile {
        login: "octocat".to_string(),
        name: Some("The Octocat".to_string()),
        avatar_url: None,
        html_url: Some("https://github.com/octocat".to_string()),
        bio: None,
        location: None,
        company: None,
        blog: None,
        followers: 12,
        public_repos: 3,
        created_at: "2011-01-25T18:44:36Z".parse().unwrap(),
    };
    let repository = |id: u64, language: &str, stars: u64| Repository {
        id,
        name: format!("repo{}", id),
        html_url: format!("https://github.com/octocat/repo{}", id),
        description: None,
        language: Some(language.to_string()),
        stargazers_count: Some(stars),
        forks_count: Some(1),
        fork: false,
        archived: false,
    };
    let push = |created_at: &str, commits: usize| Event {
        kind: PUSH_EVENT.to_string(),
        created_at: created_at.parse().unwrap(),
        payload: EventPayload {
            commits: Some(vec![Commit::new("sha".to_string(), "msg".to_string()); commits]),
        },
    };
    StaticClient {
        profile: Some(profile),
        repositories: vec![repository(1, "Ruby", 40), repository(2, "Rust", 80), repository(3, "Ruby", 5)],
        events: vec![push("2024-03-01T07:15:00Z", 2), push("2024-03-02T10:45:00Z", 1)],
        events_error: false,
    }
}

#[cfg(test)]
#[tokio::test]
async fn analyze_test() -> anyhow::Result<()> {
    let analyzer = DeveloperAnalyzer::new(sample_client());
    let insights = analyzer.analyze(" octocat ", &Utc).await?;

    assert_eq!(insights.profile.login, "octocat");
    assert_eq!(insights.languages[0].name, "Rust");
    assert_eq!(insights.languages[1].name, "Ruby");
    assert_eq!(insights.impact.total_stars, 125);
    assert_eq!(insights.impact.total_forks, 3);
    assert_eq!(insights.rhythm.total_commits, 3);
    assert_eq!(insights.rhythm.persona, Persona::EarlyBird);
    assert_eq!(insights.developer_class, DeveloperClass::VeteranArchitect);
    Ok(())
}

#[cfg(test)]
#[tokio::test]
async fn analyze_fails_when_any_fetch_fails_test() {
    let analyzer = DeveloperAnalyzer::new(StaticClient {
        events_error: true,
        ..sample_client()
    });
    let result = analyzer.analyze("octocat", &Utc).await;
    assert!(matches!(result, Err(Error::RateLimited)));

    let analyzer = DeveloperAnalyzer::new(StaticClient {
        profile: None,
        ..sample_client()
    });
    let result = analyzer.analyze("octocat", &Utc).await;
    assert_eq!(result.unwrap_err().to_string(), "User not found");
}

#[cfg(test)]
#[tokio::test]
async fn analyze_rejects_empty_login_test() {
    let analyzer = DeveloperAnalyzer::new(sample_client());
    let result = analyzer.analyze("   ", &Utc).await;
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn insights_json_test() -> anyhow::Result<()> {
    let client = sample_client();
    let insights = build_insights(
        client.profile.unwrap(),
        &client.repositories,
        &client.events,
        &Utc,
        "2024-06-01T00:00:00Z".parse()?,
    );
    let json = serde_json::to_value(&insights)?;
    assert_eq!(json["developerClass"], "Veteran Architect");
    assert_eq!(json["rhythm"]["persona"], "Early Bird");
    assert_eq!(json["rhythm"]["totalCommits"], 3);
    assert_eq!(json["rhythm"]["chartData"][7]["hour"], "7:00");
    assert_eq!(json["rhythm"]["chartData"][7]["commits"], 2);
    assert_eq!(json["impact"]["mostStarred"][0]["name"], "repo2");
    assert_eq!(json["languages"][0]["weight"], 41.0);
    assert_eq!(json["profile"]["publicRepos"], 3);
    Ok(())
}
