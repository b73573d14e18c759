use chrono::Datelike;
use dev_aura::{DeveloperInsights, HourlyCommits, LanguageSummary};
use std::fmt::Write;

/// Languages shown in the language galaxy.
const TOP_LANGUAGES: usize = 8;
const BAR_WIDTH: usize = 30;
const NO_BIO: &str = "This user hasn't added a bio yet.";

/// Renders insights as a plain text report.
pub fn text_report(insights: &DeveloperInsights) -> String {
    let mut out = String::new();
    write_profile(&mut out, insights);
    out.push('\n');
    write_languages(&mut out, &insights.languages);
    out.push('\n');
    write_rhythm(&mut out, insights);
    out.push('\n');
    write_top_repositories(&mut out, insights);
    out
}

fn write_profile(out: &mut String, insights: &DeveloperInsights) {
    let profile = &insights.profile;
    let _ = writeln!(out, "{} (@{}) · {}", profile.display_name(), profile.login, insights.developer_class);
    let _ = writeln!(out, "{}", profile.bio.as_deref().unwrap_or(NO_BIO));

    let mut details = Vec::new();
    if let Some(location) = &profile.location {
        details.push(location.clone());
    }
    if let Some(company) = &profile.company {
        details.push(company.clone());
    }
    if let Some(blog) = &profile.blog {
        if blog.starts_with("http") {
            details.push(blog.clone());
        } else {
            details.push(format!("https://{}", blog));
        }
    }
    details.push(format!("Joined {}", profile.created_at.year()));
    let _ = writeln!(out, "{}", details.join(" · "));

    let _ = writeln!(
        out,
        "Public repos: {}  Total stars: {}  Followers: {}  Recent commits: {}",
        profile.public_repos, insights.impact.total_stars, profile.followers, insights.rhythm.total_commits
    );
}

fn write_languages(out: &mut String, languages: &[LanguageSummary]) {
    let _ = writeln!(out, "Language galaxy");
    if languages.is_empty() {
        let _ = writeln!(out, "  No language data found");
        return;
    }
    let top = &languages[..languages.len().min(TOP_LANGUAGES)];
    let max_weight = top[0].weight;
    let name_width = top.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
    for language in top {
        let _ = writeln!(
            out,
            "  {:<width$} {:<bar$} {} repos, {} stars",
            language.name,
            bar(language.weight, max_weight),
            language.count,
            language.stars,
            width = name_width,
            bar = BAR_WIDTH
        );
    }
}

fn write_rhythm(out: &mut String, insights: &DeveloperInsights) {
    let rhythm = &insights.rhythm;
    let _ = writeln!(out, "Activity rhythm · {}", rhythm.persona);
    let max_commits = rhythm.chart_data.iter().map(|h| h.commits).max().unwrap_or(0);
    for HourlyCommits { hour, commits } in &rhythm.chart_data {
        let _ = writeln!(
            out,
            "  {:>5} {:<bar$} {}",
            hour,
            bar(*commits as f64, max_commits as f64),
            commits,
            bar = BAR_WIDTH
        );
    }
}

fn write_top_repositories(out: &mut String, insights: &DeveloperInsights) {
    let _ = writeln!(out, "Top repositories");
    if insights.impact.most_starred.is_empty() {
        let _ = writeln!(out, "  No public repositories");
        return;
    }
    for (rank, repo) in insights.impact.most_starred.iter().enumerate() {
        let _ = write!(out, "  {}. {}  ★ {}  ⑂ {}", rank + 1, repo.name, repo.stars(), repo.forks());
        if let Some(description) = &repo.description {
            let _ = write!(out, "  {}", description);
        }
        out.push('\n');
    }
    let _ = writeln!(out, "  Total forks: {}", insights.impact.total_forks);
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

// Tests

#[cfg(test)]
use dev_aura::api::{Profile, Repository};

#[cfg(test)]
pub(crate) fn sample_insights() -> DeveloperInsights {
    let profile = Profile {
        login: "octocat".to_string(),
        name: Some("The Octocat".to_string()),
        avatar_url: None,
        html_url: None,
        bio: None,
        location: Some("San Francisco".to_string()),
        company: None,
        blog: Some("github.blog".to_string()),
        followers: 20,
        public_repos: 2,
        created_at: "2011-01-25T18:44:36Z".parse().unwrap(),
    };
    let repos = vec![
        Repository {
            id: 1,
            name: "Hello-World".to_string(),
            html_url: "https://github.com/octocat/Hello-World".to_string(),
            description: Some("My first repository on GitHub!".to_string()),
            language: Some("Rust".to_string()),
            stargazers_count: Some(120),
            forks_count: Some(30),
            fork: false,
            archived: false,
        },
        Repository {
            id: 2,
            name: "Spoon-Knife".to_string(),
            html_url: "https://github.com/octocat/Spoon-Knife".to_string(),
            description: None,
            language: Some("HTML".to_string()),
            stargazers_count: Some(10),
            forks_count: None,
            fork: false,
            archived: false,
        },
    ];
    dev_aura::build_insights(profile, &repos, &[], &chrono::Utc, "2024-06-01T00:00:00Z".parse().unwrap())
}

#[test]
fn text_report_test() {
    let report = text_report(&sample_insights());
    assert!(report.starts_with("The Octocat (@octocat) · Veteran Architect\n"));
    assert!(report.contains(NO_BIO));
    assert!(report.contains("San Francisco · https://github.blog · Joined 2011"));
    assert!(report.contains("Public repos: 2  Total stars: 130  Followers: 20  Recent commits: 0"));
    assert!(report.contains("Activity rhythm · Evening Engineer"));
    assert!(report.contains("  1. Hello-World  ★ 120  ⑂ 30  My first repository on GitHub!"));
    assert!(report.contains("  2. Spoon-Knife  ★ 10  ⑂ 0\n"));
    assert_eq!(report.lines().filter(|line| line.contains(":00 ")).count(), 24);
}

#[test]
fn bar_test() {
    assert_eq!(bar(5.0, 10.0).chars().count(), BAR_WIDTH / 2);
    assert_eq!(bar(10.0, 10.0).chars().count(), BAR_WIDTH);
    assert_eq!(bar(0.0, 0.0), "");
}
