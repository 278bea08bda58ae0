//! Check command - shows how a display name is fingerprinted
//!
//! Operator tooling: unlike the HTTP surface, this prints the internal
//! rejection reason.

use clap::Args;
use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::username::UsernameValidator;
use crate::infrastructure::username::build_validator;

/// Arguments for the check command
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Display name to validate
    pub username: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    input: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Run the check command
pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let validator = build_validator(&config.username)?;
    let report = build_report(&validator, &args.username);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_text(&report));
    }

    Ok(())
}

fn build_report(validator: &UsernameValidator, raw: &str) -> CheckReport {
    match validator.check(raw) {
        Ok(fingerprint) => CheckReport {
            input: raw.to_string(),
            valid: true,
            fingerprint: Some(fingerprint.into_inner()),
            reason: None,
        },
        Err(reason) => CheckReport {
            input: raw.to_string(),
            valid: false,
            // Content gate rejections have no fingerprint to show
            fingerprint: validator
                .normalizer()
                .normalize(raw)
                .map(|fp| fp.into_inner())
                .filter(|fp| !fp.is_empty()),
            reason: Some(reason.to_string()),
        },
    }
}

fn render_text(report: &CheckReport) -> String {
    let mut lines = vec![format!("input:       {:?}", report.input)];

    lines.push(format!(
        "valid:       {}",
        if report.valid { "yes" } else { "no" }
    ));

    if let Some(fingerprint) = &report.fingerprint {
        lines.push(format!("fingerprint: {}", fingerprint));
    }
    if let Some(reason) = &report.reason {
        lines.push(format!("reason:      {}", reason));
    }

    lines.join("\n")
}
