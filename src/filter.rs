//! Keyword filtering on server remarks.

use crate::server::ServerRecord;

use log::warn;
use regex::Regex;

/// A set of regex patterns matched against a record's remarks.
///
/// An empty set accepts everything. A pattern that fails to compile never
/// matches; the others are still tried.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    patterns: Vec<Option<Regex>>,
}

impl KeywordFilter {
    /// Compile the given patterns, keeping their order.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                match Regex::new(p) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!("Ignoring invalid filter pattern {:?}: {}", p, e);
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    /// Whether no patterns were configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `record` should be kept.
    pub fn matches(&self, record: &ServerRecord) -> bool {
        self.is_empty()
            || self
                .patterns
                .iter()
                .flatten()
                .any(|re| re.is_match(&record.remarks))
    }

    /// Drop records that match none of the patterns, preserving order.
    pub fn retain(&self, records: &mut Vec<ServerRecord>) {
        records.retain(|r| self.matches(r));
    }
}
