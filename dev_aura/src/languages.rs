use crate::api::Repository;
use serde::Serialize;
use std::collections::HashMap;

/// Repositories and stars grouped under a single primary language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSummary {
    pub name: String,
    pub count: u32,
    pub stars: u64,
    /// Ranking score, `count + 0.5 * stars`.
    pub weight: f64,
}

/// Groups repositories by primary language, heaviest language first.
///
/// Repositories without a language are skipped. Languages with equal weight keep
/// the order in which they were first seen.
pub fn summarize_languages(repositories: &[Repository]) -> Vec<LanguageSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, u32, u64)> = Vec::new();

    for repo in repositories {
        let language = match repo.language.as_deref() {
            Some(language) => language,
            None => continue,
        };
        let slot = *index.entry(language).or_insert_with(|| {
            groups.push((language, 0, 0));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.1 += 1;
        group.2 += repo.stars();
    }

    let mut summaries: Vec<LanguageSummary> = groups
        .into_iter()
        .map(|(name, count, stars)| LanguageSummary {
            name: name.to_string(),
            count,
            stars,
            weight: count as f64 + stars as f64 * 0.5,
        })
        .collect();
    // `sort_by` is stable, so ties stay in first-seen order.
    summaries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    summaries
}

#[cfg(test)]
fn repo(id: u64, language: Option<&str>, stars: Option<u64>) -> Repository {
    Repository {
        id,
        name: format!("repo{}", id),
        html_url: format!("https://github.com/octo/repo{}", id),
        description: None,
        language: language.map(str::to_string),
        stargazers_count: stars,
        forks_count: None,
        fork: false,
        archived: false,
    }
}

#[test]
fn summarize_languages_test() {
    let repos = vec![
        repo(1, Some("JavaScript"), Some(10)),
        repo(2, Some("JavaScript"), Some(5)),
        repo(3, Some("Python"), Some(20)),
        repo(4, None, Some(5)),
    ];
    let languages = summarize_languages(&repos);
    assert_eq!(
        languages,
        vec![
            LanguageSummary {
                name: "Python".to_string(),
                count: 1,
                stars: 20,
                weight: 11.0
            },
            LanguageSummary {
                name: "JavaScript".to_string(),
                count: 2,
                stars: 15,
                weight: 9.5
            },
        ]
    );
}

#[test]
fn summarize_languages_empty_test() {
    assert!(summarize_languages(&[]).is_empty());
    assert!(summarize_languages(&[repo(1, None, Some(100))]).is_empty());
}

#[test]
fn summarize_languages_ties_keep_first_seen_order_test() {
    let repos = vec![
        repo(1, Some("Go"), Some(2)),
        repo(2, Some("Rust"), None),
        repo(3, Some("C"), Some(2)),
        repo(4, Some("Rust"), Some(0)),
    ];
    let names: Vec<String> = summarize_languages(&repos).into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Go", "Rust", "C"]);
}

#[test]
fn summarize_languages_case_sensitive_test() {
    let repos = vec![repo(1, Some("rust"), None), repo(2, Some("Rust"), None)];
    assert_eq!(summarize_languages(&repos).len(), 2);
}

#[test]
fn summarize_languages_invariants_test() {
    let languages = ["Rust", "Go", "Rust", "Haskell", "Go", "Rust", "Zig"];
    let repos: Vec<Repository> = languages
        .iter()
        .enumerate()
        .map(|(i, l)| repo(i as u64, Some(*l), Some(i as u64 * 7 % 5)))
        .chain(std::iter::once(repo(99, None, Some(3))))
        .collect();
    let summaries = summarize_languages(&repos);

    assert_eq!(summaries.len(), 4);
    assert_eq!(summaries.iter().map(|s| s.count).sum::<u32>(), languages.len() as u32);
    for summary in &summaries {
        assert_eq!(summary.weight, summary.count as f64 + 0.5 * summary.stars as f64);
    }
    for pair in summaries.windows(2) {
        assert!(pair[0].weight >= pair[1].weight);
    }
    assert_eq!(summaries, summarize_languages(&repos));
}
