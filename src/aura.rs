//! Generative "aura" art derived from developer insights.

use dev_aura::{DeveloperInsights, Persona};
use rand::Rng;
use std::fmt::Write;

const PALETTE: [&str; 4] = ["#8b5cf6", "#06b6d4", "#f43f5e", "#10b981"];
const AURA_COLORS: usize = 3;
const MIN_BLUR: f64 = 20.0;
const MAX_BLUR: f64 = 80.0;
const MIN_BLOBS: u32 = 3;
const MAX_BLOBS: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Center, percent of the canvas.
    pub x: f64,
    pub y: f64,
    /// Radius, percent of the canvas.
    pub r: f64,
    pub color: &'static str,
    pub opacity: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub scale: f64,
    /// Seconds per animation cycle.
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aura {
    pub login: String,
    pub blur: f64,
    pub blobs: Vec<Blob>,
    pub description: String,
}

impl Aura {
    pub fn generate<R: Rng>(insights: &DeveloperInsights, rng: &mut R) -> Aura {
        let colors = colors(insights.languages.len());
        let total_stars = insights.impact.total_stars;
        let blur = blur(total_stars);
        let period = period(insights.rhythm.persona);

        let blobs = (0..blob_count(insights.rhythm.total_commits) as usize)
            .map(|i| Blob {
                x: rng.gen_range(30.0..70.0),
                y: rng.gen_range(30.0..70.0),
                r: rng.gen_range(15.0..40.0),
                color: colors[i % colors.len()],
                opacity: rng.gen_range(0.6..0.9),
                drift_x: rng.gen_range(-10.0..10.0),
                drift_y: rng.gen_range(-10.0..10.0),
                scale: rng.gen_range(1.1..1.4),
                duration: period + rng.gen_range(0.0..5.0),
            })
            .collect();

        let languages = if insights.languages.is_empty() {
            "your code".to_string()
        } else {
            insights
                .languages
                .iter()
                .take(AURA_COLORS)
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Aura {
            login: insights.profile.login.clone(),
            blur,
            blobs,
            description: format!("Colors derived from {}. Intensity tied to {} stars.", languages, total_stars),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_aura.svg", self.login)
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 400 400" preserveAspectRatio="xMidYMid slice">"#
        );
        let _ = writeln!(svg, "  <title>{} aura</title>", escape(&self.login));
        let _ = writeln!(svg, "  <desc>{}</desc>", escape(&self.description));
        let _ = writeln!(svg, "  <defs>");
        let _ = writeln!(
            svg,
            r#"    <filter id="aura-blur" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur in="SourceGraphic" stdDeviation="{:.2}"/></filter>"#,
            self.blur
        );
        let _ = writeln!(svg, "  </defs>");
        let _ = writeln!(svg, r#"  <g filter="url(#aura-blur)">"#);
        for blob in &self.blobs {
            let _ = writeln!(
                svg,
                r#"    <circle cx="{x:.2}%" cy="{y:.2}%" r="{r:.2}%" fill="{color}" opacity="{opacity:.2}">"#,
                x = blob.x,
                y = blob.y,
                r = blob.r,
                color = blob.color,
                opacity = blob.opacity
            );
            let _ = writeln!(
                svg,
                r#"      <animate attributeName="cx" values="{:.2}%;{:.2}%;{:.2}%" dur="{:.2}s" repeatCount="indefinite"/>"#,
                blob.x,
                blob.x + blob.drift_x,
                blob.x,
                blob.duration
            );
            let _ = writeln!(
                svg,
                r#"      <animate attributeName="cy" values="{:.2}%;{:.2}%;{:.2}%" dur="{:.2}s" repeatCount="indefinite"/>"#,
                blob.y,
                blob.y + blob.drift_y,
                blob.y,
                blob.duration
            );
            let _ = writeln!(
                svg,
                r#"      <animate attributeName="r" values="{:.2}%;{:.2}%;{:.2}%" dur="{:.2}s" repeatCount="indefinite"/>"#,
                blob.r,
                blob.r * blob.scale,
                blob.r,
                blob.duration
            );
            let _ = writeln!(svg, "    </circle>");
        }
        let _ = writeln!(svg, "  </g>");
        let _ = writeln!(svg, "</svg>");
        svg
    }
}

/// One palette color per top language, padded to exactly [`AURA_COLORS`].
fn colors(languages: usize) -> Vec<&'static str> {
    let mut colors: Vec<&'static str> = (0..languages.min(AURA_COLORS))
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();
    while colors.len() < AURA_COLORS {
        colors.push(PALETTE[colors.len()]);
    }
    colors
}

fn blur(total_stars: u64) -> f64 {
    (MIN_BLUR + total_stars as f64 / 100.0).clamp(MIN_BLUR, MAX_BLUR)
}

fn blob_count(total_commits: u32) -> u32 {
    (total_commits / 20).clamp(MIN_BLOBS, MAX_BLOBS)
}

/// Base animation period in seconds.
fn period(persona: Persona) -> f64 {
    match persona {
        Persona::NightOwl => 20.0,
        Persona::EarlyBird => 5.0,
        _ => 10.0,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// Tests

#[cfg(test)]
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn aura_parameters_test() {
    assert_eq!(blur(0), 20.0);
    assert_eq!(blur(2500), 45.0);
    assert_eq!(blur(1_000_000), 80.0);
    assert_eq!(blob_count(0), 3);
    assert_eq!(blob_count(119), 5);
    assert_eq!(blob_count(5000), 8);
    assert_eq!(period(Persona::NightOwl), 20.0);
    assert_eq!(period(Persona::EarlyBird), 5.0);
    assert_eq!(period(Persona::EveningEngineer), 10.0);
    assert_eq!(colors(0), vec!["#8b5cf6", "#06b6d4", "#f43f5e"]);
    assert_eq!(colors(7), vec!["#8b5cf6", "#06b6d4", "#f43f5e"]);
}

#[test]
fn generate_test() {
    let insights = crate::report::sample_insights();
    let aura = Aura::generate(&insights, &mut StdRng::seed_from_u64(7));

    assert_eq!(aura.file_name(), "octocat_aura.svg");
    assert_eq!(aura.blur, 21.3);
    assert_eq!(aura.blobs.len(), 3);
    assert_eq!(aura.description, "Colors derived from Rust, HTML. Intensity tied to 130 stars.");
    for blob in &aura.blobs {
        assert!((30.0..70.0).contains(&blob.x) && (30.0..70.0).contains(&blob.y));
        assert!((15.0..40.0).contains(&blob.r));
        assert!((10.0..15.0).contains(&blob.duration));
    }
    assert_eq!(aura, Aura::generate(&insights, &mut StdRng::seed_from_u64(7)));
}

#[test]
fn to_svg_test() {
    let insights = crate::report::sample_insights();
    let svg = Aura::generate(&insights, &mut StdRng::seed_from_u64(1)).to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<circle").count(), 3);
    assert!(svg.contains(r#"stdDeviation="21.30""#));
    assert!(svg.contains("<desc>Colors derived from Rust, HTML. Intensity tied to 130 stars.</desc>"));
}
