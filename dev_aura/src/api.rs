use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::Serialize;
use thiserror::Error;

/// Event type tag of a push to a repository.
pub const PUSH_EVENT: &str = "PushEvent";

#[derive(Error, Debug)]
pub enum Error {
    #[error("User not found")]
    NotFound,
    #[error("API rate limit exceeded, try again later")]
    RateLimited,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("An error occurred while fetching data from GitHub")]
    Fetch(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Public profile of a developer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub followers: u32,
    pub public_repos: u32,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub fork: bool,
    pub archived: bool,
}

impl Repository {
    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }

    pub fn forks(&self) -> u64 {
        self.forks_count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventPayload {
    pub commits: Option<Vec<Commit>>,
}

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Commit {
    pub sha: String,
    pub message: String,
}

impl Event {
    pub fn is_push(&self) -> bool {
        self.kind == PUSH_EVENT
    }

    /// Number of commits the event stands for. Never less than one.
    pub fn commit_count(&self) -> u32 {
        match &self.payload.commits {
            Some(commits) if !commits.is_empty() => saturating_count(commits.len()),
            _ => 1,
        }
    }
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Source of raw developer data.
#[cfg(feature = "api")]
#[async_trait::async_trait]
pub trait Client: Send + Sync {
    async fn profile(&self, login: &str) -> Result<Profile>;

    async fn repositories(&self, login: &str) -> Result<Vec<Repository>>;

    async fn events(&self, login: &str) -> Result<Vec<Event>>;
}

#[cfg(test)]
fn push_event(commits: Option<usize>) -> Event {
    Event {
        kind: PUSH_EVENT.to_string(),
        created_at: Utc::now(),
        payload: EventPayload {
            commits: commits.map(|n| (0..n).map(|i| Commit::new(format!("sha{}", i), "msg".to_string())).collect()),
        },
    }
}

#[test]
fn commit_count_test() {
    assert_eq!(push_event(Some(3)).commit_count(), 3);
    assert_eq!(push_event(None).commit_count(), 1);
    assert_eq!(push_event(Some(0)).commit_count(), 1, "Empty commit list still counts as a single commit");
}

#[test]
fn saturating_count_test() {
    assert_eq!(saturating_count(7), 7);
    assert_eq!(saturating_count(u32::MAX as usize), u32::MAX);
    assert_eq!(saturating_count(usize::MAX), u32::MAX);
}

#[test]
fn error_messages_test() {
    assert_eq!(Error::NotFound.to_string(), "User not found");
    assert_eq!(Error::RateLimited.to_string(), "API rate limit exceeded, try again later");
    assert_eq!(
        Error::from(anyhow::anyhow!("connection reset")).to_string(),
        "An error occurred while fetching data from GitHub"
    );
}
