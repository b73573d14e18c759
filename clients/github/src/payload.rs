use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub public_repos: u32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for dev_aura::api::Profile {
    fn from(user: User) -> Self {
        dev_aura::api::Profile {
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            bio: user.bio,
            location: user.location,
            company: user.company,
            // GitHub sends an empty string when no blog is set
            blog: user.blog.filter(|blog| !blog.is_empty()),
            followers: user.followers,
            public_repos: user.public_repos,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
}

impl From<Repo> for dev_aura::api::Repository {
    fn from(repo: Repo) -> Self {
        dev_aura::api::Repository {
            id: repo.id,
            name: repo.name,
            html_url: repo.html_url,
            description: repo.description,
            language: repo.language,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            fork: repo.fork,
            archived: repo.archived,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Deserialize, Debug, Default)]
pub struct EventPayload {
    pub commits: Option<Vec<Commit>>,
}

#[derive(Deserialize, Debug)]
pub struct Commit {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub message: String,
}

impl From<Event> for dev_aura::api::Event {
    fn from(event: Event) -> Self {
        let commits = event.payload.commits.map(|commits| {
            commits
                .into_iter()
                .map(|commit| dev_aura::api::Commit::new(commit.sha, commit.message))
                .collect()
        });
        dev_aura::api::Event {
            kind: event.kind,
            created_at: event.created_at,
            payload: dev_aura::api::EventPayload { commits },
        }
    }
}

#[test]
fn user_test() -> anyhow::Result<()> {
    let user: User = serde_json::from_str(
        r#"{
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "blog": "",
            "bio": null,
            "public_repos": 8,
            "followers": 17000,
            "created_at": "2011-01-25T18:44:36Z"
        }"#,
    )?;
    let profile = dev_aura::api::Profile::from(user);
    assert_eq!(profile.display_name(), "The Octocat");
    assert_eq!(profile.blog, None);
    assert_eq!(profile.public_repos, 8);
    assert_eq!(profile.created_at.to_rfc3339(), "2011-01-25T18:44:36+00:00");
    Ok(())
}

#[test]
fn repo_without_counts_test() -> anyhow::Result<()> {
    let repo: Repo = serde_json::from_str(r#"{ "id": 1, "name": "dotfiles", "language": null }"#)?;
    let repo = dev_aura::api::Repository::from(repo);
    assert_eq!(repo.language, None);
    assert_eq!(repo.stars(), 0);
    assert_eq!(repo.forks(), 0);
    Ok(())
}

#[test]
fn events_test() -> anyhow::Result<()> {
    let events: Vec<Event> = serde_json::from_str(
        r#"[
            {
                "type": "PushEvent",
                "created_at": "2023-10-15T02:00:00Z",
                "payload": { "push_id": 1, "commits": [ { "sha": "a1", "message": "init" }, { "sha": "b2", "message": "fix" } ] }
            },
            { "type": "PushEvent", "created_at": "2023-10-15T03:00:00Z", "payload": { "push_id": 2 } },
            { "type": "WatchEvent", "created_at": "2023-10-15T04:00:00Z" }
        ]"#,
    )?;
    let events: Vec<dev_aura::api::Event> = events.into_iter().map(dev_aura::api::Event::from).collect();
    assert_eq!(events[0].commit_count(), 2);
    assert_eq!(events[1].payload.commits, None);
    assert_eq!(events[1].commit_count(), 1);
    assert!(!events[2].is_push());
    Ok(())
}
