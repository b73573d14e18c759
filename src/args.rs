use chrono::FixedOffset;
use clap::Parser;
use secrecy::SecretString;
use std::{fmt::Display, path::PathBuf, str::FromStr};
use strum_macros::{Display as StrumDisplay, EnumString};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub username
    #[clap(short, long, env = "USER_LOGIN", parse(try_from_str=non_empty))]
    pub user: String,

    /// API OAuth access token
    #[clap(short, long, env)]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = github_client::DEFAULT_GITHUB_URL)]
    pub api_url: String,

    /// Hours east of UTC used to bucket activity, local time zone when absent
    #[clap(long, env, allow_hyphen_values = true, parse(try_from_str=utc_offset_in_range))]
    pub utc_offset: Option<FixedOffset>,

    /// Output format
    #[clap(short, long, env, default_value = "text")]
    pub format: OutputFormat,

    /// Write developer aura SVG to this file, or as `<user>_aura.svg` into this directory
    #[clap(long, env)]
    pub aura: Option<PathBuf>,

    /// Seed of the aura generator, random when absent
    #[clap(long, env)]
    pub aura_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

fn non_empty(value: &str) -> clap::Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("user must not be empty.".to_string());
    }
    Ok(value.to_string())
}

fn utc_offset_in_range(value: &str) -> clap::Result<FixedOffset, String> {
    let hours = number_in_range(value, -12, 14, "utc_offset".to_string())?;
    FixedOffset::east_opt(hours * 3600).ok_or_else(|| format!("{} is not a valid UTC offset.", hours))
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

#[test]
fn parse_args_test() {
    let args = Args::try_parse_from(["dev_aura", "--user", "octocat", "--utc-offset", "-5", "--format", "json"]).unwrap();
    assert_eq!(args.user, "octocat");
    assert_eq!(args.utc_offset, FixedOffset::west_opt(5 * 3600));
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.api_url, "https://api.github.com");
    assert!(args.aura.is_none());
}

#[test]
fn utc_offset_in_range_test() {
    assert_eq!(utc_offset_in_range("14"), Ok(FixedOffset::east_opt(14 * 3600).unwrap()));
    assert!(utc_offset_in_range("15").is_err());
    assert!(utc_offset_in_range("-13").is_err());
    assert!(utc_offset_in_range("two").is_err());
}

#[test]
fn output_format_test() {
    assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
    assert!("yaml".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::Json.to_string(), "json");
}
