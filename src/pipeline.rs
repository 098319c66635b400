//! Fetch, parse, filter and classify every provider.

use crate::config::UpdateConfig;
use crate::error::FetchError;
use crate::fetcher;
use crate::filter::KeywordFilter;
use crate::parser;
use crate::server::{ProviderOutcome, ServerRecord};

use log::{debug, info, warn};
use reqwest_middleware::ClientWithMiddleware;

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    /// Servers that passed the filter, in provider then line order.
    pub servers: Vec<ServerRecord>,
    /// One outcome per provider, in input order.
    pub outcomes: Vec<(String, ProviderOutcome)>,
}

impl PipelineResult {
    /// Providers classified as `outcome`, in input order.
    pub fn providers_with(&self, outcome: ProviderOutcome) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == outcome)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    pub fn succeeded(&self) -> Vec<&str> {
        self.providers_with(ProviderOutcome::Success)
    }

    pub fn format_errors(&self) -> Vec<&str> {
        self.providers_with(ProviderOutcome::FormatError)
    }

    pub fn network_errors(&self) -> Vec<&str> {
        self.providers_with(ProviderOutcome::NetworkError)
    }
}

/// Drives one subscription update.
pub struct Updater {
    /// Configuration for the run.
    pub config: UpdateConfig,
    client: ClientWithMiddleware,
    filter: KeywordFilter,
}

impl Updater {
    /// Create an updater with the default HTTP client.
    pub fn new(config: UpdateConfig) -> Self {
        Self::with_client(config, fetcher::build_client())
    }

    /// Create an updater that sends requests through `client`.
    pub fn with_client(config: UpdateConfig, client: ClientWithMiddleware) -> Self {
        let filter = KeywordFilter::new(&config.filters);
        Self {
            config,
            client,
            filter,
        }
    }

    /// Fetch all providers and build the merged server list.
    pub async fn run(&self) -> PipelineResult {
        info!("Fetching {} subscription(s)", self.config.providers.len());

        let documents =
            fetcher::fetch_all(&self.client, &self.config.providers, &self.config.user_agent).await;
        let result = process_documents(&self.config.providers, documents, &self.filter);

        info!(
            "Update finished: {} succeeded, {} format errors, {} network errors, {} servers",
            result.succeeded().len(),
            result.format_errors().len(),
            result.network_errors().len(),
            result.servers.len()
        );
        result
    }
}

/// Classify fetched documents and collect their filtered servers.
///
/// `documents[i]` must be the fetch result for `providers[i]`.
pub fn process_documents(
    providers: &[String],
    documents: Vec<Result<String, FetchError>>,
    filter: &KeywordFilter,
) -> PipelineResult {
    let mut result = PipelineResult::default();

    for (provider, document) in providers.iter().zip(documents) {
        let outcome = match document {
            Ok(body) => process_document(provider, &body, filter, &mut result.servers),
            Err(e) => {
                warn!("Failed to fetch {}: {}", provider, e);
                ProviderOutcome::NetworkError
            }
        };
        debug!("{}: {}", provider, outcome);
        result.outcomes.push((provider.clone(), outcome));
    }

    result
}

fn process_document(
    provider: &str,
    document: &str,
    filter: &KeywordFilter,
    servers: &mut Vec<ServerRecord>,
) -> ProviderOutcome {
    let lines = match parser::extract_proxy_section(document) {
        Ok(lines) => lines,
        Err(e) => {
            warn!("{}: {}", provider, e);
            return ProviderOutcome::FormatError;
        }
    };

    let mut parsed: Vec<ServerRecord> = lines.into_iter().filter_map(parser::parse_entry).collect();
    let total = parsed.len();
    filter.retain(&mut parsed);
    debug!(
        "{}: {} servers parsed, {} kept after filtering",
        provider,
        total,
        parsed.len()
    );

    servers.extend(parsed);
    ProviderOutcome::Success
}
