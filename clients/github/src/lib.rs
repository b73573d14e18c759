//! GitHub REST API implementation of [`dev_aura::api::Client`].

mod builder;
mod limiter;
mod payload;

use async_trait::async_trait;
use dev_aura::api::{Error, Event, Profile, Repository, Result};
use log::debug;
use reqwest::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

pub use builder::{GithubClientBuilder, DEFAULT_GITHUB_URL};

/// Largest page GitHub serves. Only the first page is ever fetched.
const MAX_PAGE_SIZE: &str = "100";

pub struct GithubClient {
    client: Client,
    github_url: Url,
    limiter: limiter::RateLimiter,
}

impl GithubClient {
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.github_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Invalid API url {}", self.github_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        self.limiter.acquire().await?;
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_request_error)?;
        self.limiter.update(response.headers()).await;
        read_response::<T>(response).await.map_err(map_request_error)
    }
}

pub(crate) async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> reqwest::Result<T> {
    response.error_for_status()?.json::<T>().await
}

/// Maps HTTP failures onto the errors reported to the user.
fn map_request_error(err: reqwest::Error) -> Error {
    match err.status() {
        Some(StatusCode::NOT_FOUND) => Error::NotFound,
        Some(StatusCode::FORBIDDEN) | Some(StatusCode::TOO_MANY_REQUESTS) => Error::RateLimited,
        _ => Error::Fetch(err.into()),
    }
}

#[async_trait]
impl dev_aura::api::Client for GithubClient {
    async fn profile(&self, login: &str) -> Result<Profile> {
        let url = self.endpoint(&["users", login])?;
        let user = self.get::<payload::User>(url, &[]).await?;
        Ok(Profile::from(user))
    }

    async fn repositories(&self, login: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["users", login, "repos"])?;
        let repos = self
            .get::<Vec<payload::Repo>>(url, &[("per_page", MAX_PAGE_SIZE), ("sort", "pushed")])
            .await?;
        Ok(repos.into_iter().map(Repository::from).collect())
    }

    async fn events(&self, login: &str) -> Result<Vec<Event>> {
        let url = self.endpoint(&["users", login, "events"])?;
        let events = self
            .get::<Vec<payload::Event>>(url, &[("per_page", MAX_PAGE_SIZE)])
            .await?;
        Ok(events.into_iter().map(Event::from).collect())
    }
}

#[test]
fn endpoint_test() -> anyhow::Result<()> {
    let client = GithubClientBuilder::default().build()?;
    assert_eq!(
        client.endpoint(&["users", "octocat", "repos"])?.as_str(),
        "https://api.github.com/users/octocat/repos"
    );

    let client = GithubClientBuilder::default()
        .with_github_url("https://github.example.com/api/v3/")
        .build()?;
    assert_eq!(
        client.endpoint(&["users", "we ird"])?.as_str(),
        "https://github.example.com/api/v3/users/we%20ird"
    );
    Ok(())
}
