//! # ss-sub-update
//!
//! Refresh a shadowsocks client configuration from Surge subscriptions.
//!
//! Every provider's profile is downloaded concurrently, its `[Proxy]` section
//! is parsed into server records, records are filtered by remark, and the
//! result replaces the server list in the client's `gui-config.json`.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod gui_config;
pub mod middleware;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod server;

pub use config::{UpdateConfig, UpdateConfigBuilder, DEFAULT_USER_AGENT};
pub use error::{FetchError, FormatError, UpdateError};
pub use filter::KeywordFilter;
pub use gui_config::GuiConfig;
pub use middleware::RequestLogMiddleware;
pub use pipeline::{process_documents, PipelineResult, Updater};
pub use report::RunSummary;
pub use server::{ProviderOutcome, ServerRecord, OBFS_PLUGIN};
