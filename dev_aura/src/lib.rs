//! Developer insights
//!
//! # Overview
//!
//! Library turns a public developer's raw GitHub data into a handful of stable, ordered summaries.
//! Given a profile, the developer's repositories and their recent public events, it derives:
//! * language distribution, where every language is weighted by its repository count plus half of its stars,
//! * impact, i.e. total stars and forks together with the five most starred repositories,
//! * activity rhythm, commits of push events bucketed by hour of the day and summarized as a persona,
//! * developer class, a qualitative label picked by the first matching rule.
//!
//! All transformations are pure functions of their input.
//! With the `insights` feature enabled, [`DeveloperAnalyzer`] fetches the raw data through an [`api::Client`]
//! and assembles the results into [`DeveloperInsights`].

pub mod api;
mod classifier;
mod impact;
#[cfg(feature = "insights")]
mod insights;
mod languages;
mod rhythm;

pub use classifier::{account_age_years, classify_developer, classify_developer_at, DeveloperClass};
pub use impact::{summarize_impact, ImpactSummary, MOST_STARRED_LIMIT};
#[cfg(feature = "insights")]
pub use insights::{build_insights, DeveloperAnalyzer, DeveloperInsights};
pub use languages::{summarize_languages, LanguageSummary};
pub use rhythm::{compute_rhythm, HourlyCommits, Persona, RhythmSummary, HOURS_PER_DAY};
