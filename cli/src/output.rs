use x509::CertificateLocations;
use x509::report::report;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text layout
    Text,
    /// JSON dump of every location
    Json,
    /// YAML dump of every location
    Yaml,
}

/// Structured rendering for the non-text formats, `None` for text.
pub(crate) fn render(format: OutputFormat, locations: &CertificateLocations) -> Result<Option<String>> {
    let reports = report(locations);
    let rendered = match format {
        OutputFormat::Text => return Ok(None),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Yaml => {
            // Convert to JSON value first, then to YAML
            let value = serde_json::to_value(&reports)?;
            serde_yml::to_string(&value)?
        }
    };
    Ok(Some(rendered))
}
