//! Server records and provider outcomes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Plugin name set on every record that carries `obfs` options.
pub const OBFS_PLUGIN: &str = "obfs-local";

/// Timeout, in seconds, given to every parsed record.
pub const DEFAULT_TIMEOUT: u32 = 5;

/// Classification of one provider after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderOutcome {
    /// The document was fetched and its `[Proxy]` section was found.
    Success,
    /// The document was fetched but has no `[Proxy]` section.
    FormatError,
    /// The document could not be fetched.
    NetworkError,
}

impl fmt::Display for ProviderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderOutcome::Success => "success",
            ProviderOutcome::FormatError => "format error",
            ProviderOutcome::NetworkError => "network error",
        };
        f.write_str(label)
    }
}

/// A shadowsocks server entry, laid out the way the client stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Cipher method (e.g. "aes-256-cfb").
    pub method: String,
    pub password: String,
    /// Plugin executable name, if any.
    #[serde(
        default,
        serialize_with = "none_as_empty",
        deserialize_with = "empty_as_none"
    )]
    pub plugin: Option<String>,
    #[serde(default)]
    pub plugin_args: String,
    /// `;`-joined `key=value` options handed to the plugin.
    #[serde(
        default,
        serialize_with = "none_as_empty",
        deserialize_with = "empty_as_none"
    )]
    pub plugin_opts: Option<String>,
    /// Display name.
    pub remarks: String,
    pub server: String,
    /// 0 when the source port was not a number.
    pub server_port: u16,
    pub timeout: u32,
}

impl ServerRecord {
    /// Create a record without plugin settings.
    pub fn new(
        remarks: impl Into<String>,
        server: impl Into<String>,
        server_port: u16,
        method: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            password: password.into(),
            plugin: None,
            plugin_args: String::new(),
            plugin_opts: None,
            remarks: remarks.into(),
            server: server.into(),
            server_port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Attach the obfs plugin with the given options string.
    pub fn with_obfs(mut self, plugin_opts: impl Into<String>) -> Self {
        self.plugin = Some(OBFS_PLUGIN.to_string());
        self.plugin_opts = Some(plugin_opts.into());
        self
    }
}

fn none_as_empty<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_client_field_names() {
        let record = ServerRecord::new("HK-1", "1.2.3.4", 8388, "aes-256-cfb", "secret");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "method": "aes-256-cfb",
                "password": "secret",
                "plugin": "",
                "plugin_args": "",
                "plugin_opts": "",
                "remarks": "HK-1",
                "server": "1.2.3.4",
                "server_port": 8388,
                "timeout": 5
            })
        );
    }

    #[test]
    fn empty_plugin_reads_back_as_none() {
        let value = json!({
            "method": "rc4-md5",
            "password": "p",
            "plugin": "",
            "plugin_opts": "",
            "remarks": "a",
            "server": "h",
            "server_port": 1,
            "timeout": 5
        });
        let record: ServerRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.plugin, None);
        assert_eq!(record.plugin_opts, None);
        assert_eq!(record.plugin_args, "");
    }

    #[test]
    fn obfs_sets_plugin_name() {
        let record = ServerRecord::new("a", "h", 1, "m", "p").with_obfs("obfs=tls");
        assert_eq!(record.plugin.as_deref(), Some(OBFS_PLUGIN));
        assert_eq!(record.plugin_opts.as_deref(), Some("obfs=tls"));
    }
}
