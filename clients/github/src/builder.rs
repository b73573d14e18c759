use crate::limiter::RateLimiter;
use crate::GithubClient;
use dev_aura::api::{Error, Result};
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use url::Url;

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";
const DEFAULT_USER_AGENT: &str = "dev_aura";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        Self {
            client_builder: ClientBuilder::default(),
            github_url: DEFAULT_GITHUB_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let mut value = header_value(format!("Bearer {}", token.expose_secret()))?;
        value.set_sensitive(true);
        Ok(self.with_header(header::AUTHORIZATION, value))
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        let value = header_value(user_agent)?;
        Ok(self.with_header(header::USER_AGENT, value))
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    fn with_header(mut self, key: HeaderName, val: HeaderValue) -> GithubClientBuilder {
        self.headers.insert(key, val);
        self
    }

    pub fn build(self) -> Result<GithubClient> {
        let github_url = parse_base_url(&self.github_url)?;
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(|err| Error::Config(format!("Cannot build HTTP client: {}", err)))?;
        Ok(GithubClient {
            client,
            github_url,
            limiter: RateLimiter::default(),
        })
    }
}

fn header_value(val: impl AsRef<str>) -> Result<HeaderValue> {
    HeaderValue::from_str(val.as_ref()).map_err(|err| Error::Config(format!("Invalid header value: {}", err)))
}

/// Parses API url so that endpoint paths can be appended to it.
fn parse_base_url(github_url: &str) -> Result<Url> {
    let url = Url::parse(github_url).map_err(|err| Error::Config(format!("Invalid API url {}: {}", github_url, err)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("Invalid API url {}", github_url)));
    }
    Ok(url)
}

#[test]
fn parse_base_url_test() {
    assert!(parse_base_url("https://api.github.com").is_ok());
    assert!(parse_base_url("https://github.example.com/api/v3/").is_ok());
    assert!(matches!(parse_base_url("api.github.com"), Err(Error::Config(_))));
    assert!(matches!(parse_base_url("mailto:octocat@github.com"), Err(Error::Config(_))));
}

#[test]
fn builder_rejects_invalid_values_test() {
    let result = GithubClientBuilder::default().try_with_user_agent("bad\nagent");
    assert!(matches!(result, Err(Error::Config(_))));

    let result = GithubClientBuilder::default().with_github_url("not a url").build();
    assert!(matches!(result, Err(Error::Config(_))));
}
