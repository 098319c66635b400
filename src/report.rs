//! Human-readable run summary.

use crate::pipeline::PipelineResult;

use std::fmt;

/// Console summary of one update run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary<'a> {
    pub filters: &'a [String],
    pub result: &'a PipelineResult,
}

impl<'a> RunSummary<'a> {
    pub fn new(filters: &'a [String], result: &'a PipelineResult) -> Self {
        Self { filters, result }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, title: &str, providers: &[&str]) -> fmt::Result {
    writeln!(f, "{}:", title)?;
    if providers.is_empty() {
        writeln!(f, " (none)")?;
    }
    for provider in providers {
        writeln!(f, " - {}", provider)?;
    }
    Ok(())
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Providers: {}", self.result.outcomes.len())?;
        if self.filters.is_empty() {
            writeln!(f, "Filter: (none)")?;
        } else {
            writeln!(f, "Filter: {}", self.filters.join(" | "))?;
        }
        writeln!(f, "----------------")?;
        write_group(f, "Succeeded", &self.result.succeeded())?;
        write_group(f, "Format error", &self.result.format_errors())?;
        write_group(f, "Network error", &self.result.network_errors())?;
        writeln!(f, "----------------")?;
        write!(f, "{} servers to merge", self.result.servers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{ProviderOutcome, ServerRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_providers_by_outcome() {
        let result = PipelineResult {
            servers: vec![ServerRecord::new("HK", "h", 1, "m", "p")],
            outcomes: vec![
                ("https://a".to_string(), ProviderOutcome::Success),
                ("https://b".to_string(), ProviderOutcome::NetworkError),
            ],
        };
        let filters = vec!["HK".to_string(), "US".to_string()];

        assert_eq!(
            RunSummary::new(&filters, &result).to_string(),
            "Providers: 2\n\
             Filter: HK | US\n\
             ----------------\n\
             Succeeded:\n - https://a\n\
             Format error:\n (none)\n\
             Network error:\n - https://b\n\
             ----------------\n\
             1 servers to merge"
        );
    }
}
