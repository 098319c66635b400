//! Surge profile parsing.
//!
//! A provider document is a Surge profile. Proxy definitions live between the
//! `[Proxy]` and `[Proxy Group]` headers, one per line:
//!
//! ```text
//! HK-1 = custom, 1.2.3.4, 8388, aes-256-cfb, secret, https://example.com/SSEncrypt.module, obfs=http, obfs-host=example.com
//! ```
//!
//! Parsing is a series of independent regex probes over each line. A line that
//! does not look like a `custom` entry is skipped, not reported.

use crate::error::FormatError;
use crate::server::ServerRecord;

use once_cell::sync::Lazy;
use regex::Regex;

static PROXY_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[Proxy\]([\s\S]*?)\[Proxy Group\]").unwrap());

static CUSTOM_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*?)\s*=\s*custom,(.*?),(.*?),(.*?),(.*?),").unwrap());

static OBFS_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"obfs\s*=\s*(.*?)(?:,|$)").unwrap());

static OBFS_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"obfs-host\s*=\s*(.*?)(?:,|$)").unwrap());

/// Return the lines between `[Proxy]` and the first `[Proxy Group]` after it.
///
/// Blank lines are kept; [`parse_entry`] skips them.
pub fn extract_proxy_section(document: &str) -> Result<Vec<&str>, FormatError> {
    let section = PROXY_SECTION
        .captures(document)
        .and_then(|caps| caps.get(1))
        .ok_or(FormatError::MissingProxySection)?;

    Ok(section.as_str().split('\n').collect())
}

/// Parse one `custom` proxy line.
///
/// Returns `None` when the line is not a proxy entry or its label is empty.
pub fn parse_entry(line: &str) -> Option<ServerRecord> {
    let caps = CUSTOM_ENTRY.captures(line)?;
    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str().trim());

    let remarks = field(1);
    if remarks.is_empty() {
        return None;
    }

    let port = field(3).parse::<u16>().unwrap_or(0);
    let record = ServerRecord::new(remarks, field(2), port, field(4), field(5));

    let Some(obfs) = capture_value(&OBFS_TYPE, line) else {
        return Some(record);
    };

    let mut plugin_opts = format!("obfs={}", obfs);
    if let Some(host) = capture_value(&OBFS_HOST, line) {
        plugin_opts.push_str(";obfs-host=");
        plugin_opts.push_str(host);
    }

    Some(record.with_obfs(plugin_opts))
}

fn capture_value<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}
