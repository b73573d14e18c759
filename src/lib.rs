mod args;
pub mod aura;
pub mod report;

pub use args::{Args, OutputFormat};

use aura::Aura;
use chrono::Local;
use dev_aura::api::Result;
use dev_aura::{DeveloperAnalyzer, DeveloperInsights};
use github_client::GithubClientBuilder;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Fetches and aggregates insights about `args.user`.
pub async fn developer_insights(args: &Args) -> Result<DeveloperInsights> {
    let mut client = GithubClientBuilder::default().with_github_url(&args.api_url);
    if let Some(token) = &args.api_token {
        client = client.try_with_token(token.clone())?;
    }
    let client = client.build()?;

    let analyzer = DeveloperAnalyzer::new(client);
    match args.utc_offset {
        Some(offset) => analyzer.analyze(&args.user, &offset).await,
        None => analyzer.analyze(&args.user, &Local).await,
    }
}

pub fn render(insights: &DeveloperInsights, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(report::text_report(insights)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(insights)?),
    }
}

/// Writes the developer aura SVG if requested, returning the file written.
pub fn write_aura(insights: &DeveloperInsights, args: &Args) -> anyhow::Result<Option<PathBuf>> {
    let path = match &args.aura {
        Some(path) => path,
        None => return Ok(None),
    };
    let mut rng = match args.aura_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let aura = Aura::generate(insights, &mut rng);
    let path = if path.is_dir() {
        path.join(aura.file_name())
    } else {
        path.clone()
    };
    std::fs::write(&path, aura.to_svg())?;
    info!("Aura of {} written to {}", insights.profile.login, path.display());
    Ok(Some(path))
}
