use crate::api::Repository;
use serde::Serialize;

/// Number of repositories listed in [`ImpactSummary::most_starred`].
pub const MOST_STARRED_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    pub total_stars: u64,
    pub total_forks: u64,
    pub most_starred: Vec<Repository>,
}

/// Sums stars and forks over all repositories and picks the most starred ones.
///
/// Equally starred repositories keep their input order.
pub fn summarize_impact(repositories: &[Repository]) -> ImpactSummary {
    let total_stars = repositories.iter().map(Repository::stars).sum();
    let total_forks = repositories.iter().map(Repository::forks).sum();

    let mut most_starred = repositories.to_vec();
    most_starred.sort_by(|a, b| b.stars().cmp(&a.stars()));
    most_starred.truncate(MOST_STARRED_LIMIT);

    ImpactSummary {
        total_stars,
        total_forks,
        most_starred,
    }
}

#[cfg(test)]
fn repo(id: u64, stars: Option<u64>, forks: Option<u64>) -> Repository {
    Repository {
        id,
        name: format!("repo{}", id),
        html_url: format!("https://github.com/octo/repo{}", id),
        description: None,
        language: None,
        stargazers_count: stars,
        forks_count: forks,
        fork: false,
        archived: false,
    }
}

#[cfg(test)]
fn names(impact: &ImpactSummary) -> Vec<&str> {
    impact.most_starred.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn summarize_impact_test() {
    let repos = vec![
        repo(1, Some(50), Some(10)),
        repo(2, Some(200), Some(50)),
        repo(3, Some(10), Some(2)),
    ];
    let impact = summarize_impact(&repos);
    assert_eq!(impact.total_stars, 260);
    assert_eq!(impact.total_forks, 62);
    assert_eq!(names(&impact), vec!["repo2", "repo1", "repo3"]);
}

#[test]
fn summarize_impact_empty_test() {
    assert_eq!(
        summarize_impact(&[]),
        ImpactSummary {
            total_stars: 0,
            total_forks: 0,
            most_starred: vec![]
        }
    );
}

#[test]
fn summarize_impact_top_five_test() {
    let repos = vec![
        repo(1, Some(3), None),
        repo(2, None, Some(4)),
        repo(3, Some(7), Some(1)),
        repo(4, Some(3), None),
        repo(5, Some(9), None),
        repo(6, Some(3), None),
        repo(7, Some(1), None),
    ];
    let impact = summarize_impact(&repos);
    assert_eq!(impact.total_stars, 26);
    assert_eq!(impact.total_forks, 5);
    assert_eq!(names(&impact), vec!["repo5", "repo3", "repo1", "repo4", "repo6"]);
    assert_eq!(impact, summarize_impact(&repos));
}
