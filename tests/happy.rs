use chrono::FixedOffset;
use dev_aura::{DeveloperClass, Persona};
use dev_aura_app::{developer_insights, render, write_aura, Args, OutputFormat};
use secrecy::SecretString;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN: &str = "octocat";

fn args(server: &MockServer) -> Args {
    Args {
        user: LOGIN.to_string(),
        api_token: None,
        api_url: server.uri(),
        utc_offset: FixedOffset::east_opt(0),
        format: OutputFormat::Json,
        aura: None,
        aura_seed: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn happy_path() {
    let server = MockServer::start().await;
    mock_profile(&server).await;
    mock_repos(&server, 12).await;
    mock_events(&server).await;

    let insights = developer_insights(&args(&server)).await.unwrap();

    assert_eq!(insights.profile.login, LOGIN);
    assert_eq!(insights.profile.public_repos, 12);

    // repositories cycle through Rust, Go and no language
    assert_eq!(insights.languages.len(), 2);
    assert_eq!(insights.languages[0].name, "Go");
    assert_eq!(insights.languages[0].weight, 114.0);
    assert_eq!(insights.languages[1].name, "Rust");
    assert_eq!(insights.languages[1].weight, 94.0);
    assert_eq!(insights.languages.iter().map(|l| l.count).sum::<u32>(), 8);

    // repo_i has i * 10 stars and i forks
    assert_eq!(insights.impact.total_stars, 660);
    assert_eq!(insights.impact.total_forks, 66);
    let most_starred: Vec<&str> = insights.impact.most_starred.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(most_starred, vec!["repo_11", "repo_10", "repo_9", "repo_8", "repo_7"]);

    assert_eq!(insights.rhythm.chart_data.len(), 24);
    assert_eq!(insights.rhythm.total_commits, 5);
    assert_eq!(insights.rhythm.chart_data[21].commits, 3);
    assert_eq!(insights.rhythm.chart_data[9].commits, 2);
    assert_eq!(insights.rhythm.persona, Persona::EveningEngineer);

    assert_eq!(insights.developer_class, DeveloperClass::VeteranArchitect);

    let json = render(&insights, OutputFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(json["developerClass"], "Veteran Architect");
    assert_eq!(json["rhythm"]["persona"], "Evening Engineer");
}

#[tokio::test]
async fn user_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = developer_insights(&args(&server)).await.unwrap_err();
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn rate_limit_exceeded() {
    let server = MockServer::start().await;
    mock_profile(&server).await;
    mock_repos(&server, 3).await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/events", LOGIN)))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({ "message": "API rate limit exceeded" })))
        .mount(&server)
        .await;

    let err = developer_insights(&args(&server)).await.unwrap_err();
    assert_eq!(err.to_string(), "API rate limit exceeded, try again later");
}

#[tokio::test]
async fn server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = developer_insights(&args(&server)).await.unwrap_err();
    assert_eq!(err.to_string(), "An error occurred while fetching data from GitHub");
}

#[tokio::test]
async fn too_many_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = developer_insights(&args(&server)).await.unwrap_err();
    assert_eq!(err.to_string(), "API rate limit exceeded, try again later");
}

#[tokio::test]
async fn token_sent_as_bearer() {
    let server = MockServer::start().await;
    // requests without the expected header fall through to wiremock's 404
    for endpoint in ["", "/repos", "/events"] {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}{}", LOGIN, endpoint)))
            .and(header("Authorization", "Bearer s3cr3t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(match endpoint {
                "" => profile_body(),
                _ => serde_json::json!([]),
            }))
            .mount(&server)
            .await;
    }

    let args = Args {
        api_token: Some(SecretString::new("s3cr3t".to_string())),
        ..args(&server)
    };
    let insights = developer_insights(&args).await.unwrap();
    assert_eq!(insights.profile.login, LOGIN);
    assert!(insights.languages.is_empty());
    assert_eq!(insights.rhythm.total_commits, 0);
}

#[tokio::test]
async fn aura_written_to_file() {
    let server = MockServer::start().await;
    mock_profile(&server).await;
    mock_repos(&server, 5).await;
    mock_events(&server).await;
    let insights = developer_insights(&args(&server)).await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let in_dir = Args {
        aura: Some(dir.path().to_path_buf()),
        aura_seed: Some(42),
        ..args(&server)
    };
    let written = write_aura(&insights, &in_dir).unwrap().unwrap();
    assert_eq!(written, dir.path().join("octocat_aura.svg"));

    let explicit = Args {
        aura: Some(dir.path().join("again.svg")),
        aura_seed: Some(42),
        ..args(&server)
    };
    let written_again = write_aura(&insights, &explicit).unwrap().unwrap();

    let svg = std::fs::read_to_string(&written).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Intensity tied to 100 stars."));
    assert_eq!(svg, std::fs::read_to_string(written_again).unwrap(), "Same seed should draw the same aura");

    let no_aura = args(&server);
    assert_eq!(write_aura(&insights, &no_aura).unwrap(), None);
}

fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "login": LOGIN,
        "id": 583231,
        "name": "The Octocat",
        "html_url": "https://github.com/octocat",
        "bio": null,
        "blog": "https://github.blog",
        "followers": 17000,
        "public_repos": 12,
        "created_at": "2011-01-25T18:44:36Z"
    })
}

async fn mock_profile(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", LOGIN)))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(server)
        .await;
}

async fn mock_repos(server: &MockServer, repos_count: u32) {
    let repos: Vec<serde_json::Value> = (0..repos_count)
        .map(|i| {
            let language = match i % 3 {
                0 => serde_json::json!("Rust"),
                1 => serde_json::json!("Go"),
                _ => serde_json::Value::Null,
            };
            serde_json::json!({
                "id": i,
                "name": format!("repo_{}", i),
                "html_url": format!("https://github.com/{}/repo_{}", LOGIN, i),
                "description": null,
                "language": language,
                "stargazers_count": i * 10,
                "forks_count": i,
                "fork": false
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", LOGIN)))
        .and(query_param("per_page", "100"))
        .and(query_param("sort", "pushed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos))
        .mount(server)
        .await;
}

async fn mock_events(server: &MockServer) {
    let body = serde_json::json!([
        {
            "type": "PushEvent",
            "created_at": "2024-03-01T21:10:00Z",
            "payload": { "commits": [ { "sha": "a", "message": "one" }, { "sha": "b", "message": "two" } ] }
        },
        { "type": "PushEvent", "created_at": "2024-03-02T21:50:00Z", "payload": {} },
        { "type": "PushEvent", "created_at": "2024-03-03T09:05:00Z", "payload": { "commits": [ { "sha": "c", "message": "three" }, { "sha": "d", "message": "four" } ] } },
        { "type": "IssuesEvent", "created_at": "2024-03-03T10:00:00Z", "payload": { "action": "opened" } }
    ]);
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/events", LOGIN)))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
