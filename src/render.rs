//! Output rendering for generated models.

use clap::ValueEnum;
use serde::Serialize;
use soa_generator::{InvocationStats, SoaModel};
use std::fmt::Write;

/// Output format for the generated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One text block per repository
    Text,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct InvocationReport<'a> {
    service: &'a str,
    #[serde(flatten)]
    stats: InvocationStats,
    observed_error_rate: f64,
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    model: &'a SoaModel,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    invocations: Vec<InvocationReport<'a>>,
}

/// Render a model, followed by simulated invocation results if any.
pub fn render(
    model: &SoaModel,
    invocations: &[(String, InvocationStats)],
    format: OutputFormat,
) -> anyhow::Result<String> {
    let report = Report {
        model,
        invocations: invocations
            .iter()
            .map(|(service, stats)| InvocationReport {
                service,
                stats: *stats,
                observed_error_rate: stats.observed_error_rate(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Text => {
            let mut out = model.to_string();
            if !report.invocations.is_empty() {
                out.push_str("\n# invocations\n");
                for entry in &report.invocations {
                    writeln!(
                        out,
                        "service {}: calls = {}, failures = {}, observed_error_rate = {}",
                        entry.service,
                        entry.stats.calls,
                        entry.stats.failures,
                        entry.observed_error_rate
                    )?;
                }
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&report)?),
    }
}
