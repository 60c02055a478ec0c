//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. line-bot-mcp.toml 設定ファイル
//! 3. デフォルト値
//!
//! `CHANNEL_ACCESS_TOKEN` と `DESTINATION_USER_ID` は必須で、環境変数からのみ読み込みます。
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::{Error, Result};

/// Default LINE Messaging API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "line-bot-mcp.toml";

/// How remote call failures surface to the MCP client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Report failures as a structured error payload in the tool result
    #[default]
    Catch,
    /// Return failures as protocol-level errors
    Propagate,
}

impl ErrorMode {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "catch" => Ok(Self::Catch),
            "propagate" => Ok(Self::Propagate),
            other => Err(Error::Config(format!(
                "Invalid error mode '{}' (expected 'catch' or 'propagate')",
                other
            ))),
        }
    }
}

/// Static group name → recipient ID table
///
/// Loaded once at startup and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupMappings(BTreeMap<String, String>);

impl GroupMappings {
    /// Create an empty mapping table
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping table shipped with the server
    pub fn builtin() -> Self {
        [("大同訂貨測試", "C8454521a69a83333ae76724a91adb48a")]
            .into_iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect()
    }

    /// Parse `name=id` pairs separated by commas
    pub fn parse_pairs(value: &str) -> Result<Self> {
        value
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, id) = pair.split_once('=').ok_or_else(|| {
                    Error::Config(format!("Invalid group mapping '{}' (expected name=id)", pair))
                })?;
                Ok((name.trim().to_string(), id.trim().to_string()))
            })
            .collect::<Result<Self>>()?
            .validated()
    }

    /// Reject entries with an empty name or ID
    fn validated(self) -> Result<Self> {
        let invalid = self
            .iter()
            .find(|(name, id)| name.trim().is_empty() || id.trim().is_empty());
        if let Some((name, id)) = invalid {
            return Err(Error::Config(format!(
                "Invalid group mapping '{}={}' (empty name or id)",
                name, id
            )));
        }
        Ok(self)
    }

    /// Look up the recipient ID for a group name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate over `(name, id)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, id)| (name.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge another table over this one; entries in `other` win
    fn merge(&mut self, other: GroupMappings) {
        self.0.extend(other.0);
    }
}

impl FromIterator<(String, String)> for GroupMappings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Tool gateway configuration
///
/// Injected into the gateway at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Recipient used when a call names neither a user nor a known group
    pub default_recipient: String,

    /// Group name → recipient ID table
    pub groups: GroupMappings,

    /// Whether `groupName` arguments and the `list_groups` tool are enabled
    pub group_resolution: bool,

    /// How remote failures are reported
    pub error_mode: ErrorMode,
}

impl GatewayConfig {
    /// Create a configuration with the built-in group table
    pub fn new(default_recipient: impl Into<String>) -> Self {
        Self {
            default_recipient: default_recipient.into(),
            groups: GroupMappings::builtin(),
            group_resolution: true,
            error_mode: ErrorMode::Catch,
        }
    }

    pub fn with_groups(mut self, groups: GroupMappings) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_group_resolution(mut self, enabled: bool) -> Self {
        self.group_resolution = enabled;
        self
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }
}

/// LINE Messaging API connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineConfig {
    /// Channel access token (sent as a bearer credential)
    pub channel_access_token: String,

    /// API base URL without the `/v2` suffix
    pub api_base_url: String,
}

/// Main configuration for the LINE Bot MCP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub line: LineConfig,
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from the environment and the optional config file
    ///
    /// The file is taken from `LINE_BOT_MCP_CONFIG`, or `line-bot-mcp.toml`
    /// in the working directory if it exists.
    pub fn load() -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();

        if let Some(path) = lookup("LINE_BOT_MCP_CONFIG").filter(|p| !p.is_empty()) {
            return Self::from_toml_file_with(path, lookup);
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file_with(DEFAULT_CONFIG_FILE, lookup);
        }

        Self::from_lookup(None, lookup)
    }

    fn from_toml_file_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading configuration file");

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded = expand_env_vars(&content, &lookup);

        let file: TomlConfig = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        Self::from_lookup(Some(file), lookup)
    }

    /// Build the configuration from an optional parsed file and a variable lookup
    fn from_lookup<F>(file: Option<TomlConfig>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let channel_access_token =
            non_empty("CHANNEL_ACCESS_TOKEN").ok_or(Error::MissingEnv("CHANNEL_ACCESS_TOKEN"))?;
        let default_recipient =
            non_empty("DESTINATION_USER_ID").ok_or(Error::MissingEnv("DESTINATION_USER_ID"))?;

        let file = file.unwrap_or_default();
        let file_line = file.line.unwrap_or_default();
        let file_gateway = file.gateway.unwrap_or_default();

        let api_base_url = non_empty("LINE_API_BASE_URL")
            .or(file_line.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let mut groups = match file.groups {
            Some(groups) => groups.validated()?,
            None => GroupMappings::builtin(),
        };
        if let Some(pairs) = non_empty("LINE_GROUP_MAPPINGS") {
            groups.merge(GroupMappings::parse_pairs(&pairs)?);
        }

        let group_resolution = match non_empty("LINE_GROUP_RESOLUTION") {
            Some(value) => parse_bool("LINE_GROUP_RESOLUTION", &value)?,
            None => file_gateway.group_resolution.unwrap_or(true),
        };

        let error_mode = match non_empty("LINE_ERROR_MODE") {
            Some(value) => ErrorMode::parse(&value)?,
            None => file_gateway.error_mode.unwrap_or_default(),
        };

        Ok(Config {
            line: LineConfig {
                channel_access_token,
                api_base_url,
            },
            gateway: GatewayConfig {
                default_recipient,
                groups,
                group_resolution,
                error_mode,
            },
        })
    }
}

/// Strict boolean parsing for environment flags
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::Config(format!(
            "Invalid value '{}' for {} (expected 'true' or 'false')",
            other, key
        ))),
    }
}

/// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
/// 環境変数が存在しない場合は空文字列になります。
fn expand_env_vars<F>(value: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                if let Some(env_value) = lookup(&after[..end]) {
                    result.push_str(&env_value);
                }
                rest = &after[end + 1..];
            }
            None => {
                // 閉じ括弧がない場合はそのまま残す
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

// ============================================================================
// TOML 構造体定義（ファイル解析用）
// ============================================================================

/// TOML ファイル用のトップレベル構造
#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    /// LINE API 設定
    line: Option<TomlLineConfig>,
    /// ゲートウェイ設定
    gateway: Option<TomlGatewayConfig>,
    /// グループ名 → ID
    groups: Option<GroupMappings>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlLineConfig {
    #[serde(default)]
    api_base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlGatewayConfig {
    #[serde(default)]
    group_resolution: Option<bool>,
    #[serde(default)]
    error_mode: Option<ErrorMode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![("CHANNEL_ACCESS_TOKEN", "token"), ("DESTINATION_USER_ID", "U123")]
    }

    #[test]
    fn test_defaults_from_env() {
        let config = Config::from_lookup(None, env(&required())).unwrap();
        assert_eq!(config.line.channel_access_token, "token");
        assert_eq!(config.line.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.gateway.default_recipient, "U123");
        assert_eq!(config.gateway.groups, GroupMappings::builtin());
        assert!(config.gateway.group_resolution);
        assert_eq!(config.gateway.error_mode, ErrorMode::Catch);
    }

    #[test]
    fn test_missing_access_token() {
        let err = Config::from_lookup(None, env(&[("DESTINATION_USER_ID", "U123")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("CHANNEL_ACCESS_TOKEN")));
        assert_eq!(err.to_string(), "Please set CHANNEL_ACCESS_TOKEN");
    }

    #[test]
    fn test_missing_destination() {
        let err = Config::from_lookup(
            None,
            env(&[("CHANNEL_ACCESS_TOKEN", "token"), ("DESTINATION_USER_ID", "")]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Please set DESTINATION_USER_ID");
    }

    #[test]
    fn test_env_overrides() {
        let mut vars = required();
        vars.extend([
            ("LINE_API_BASE_URL", "http://127.0.0.1:9000/"),
            ("LINE_GROUP_RESOLUTION", "false"),
            ("LINE_ERROR_MODE", "propagate"),
            ("LINE_GROUP_MAPPINGS", "sales=C1, ops = C2"),
        ]);

        let config = Config::from_lookup(None, env(&vars)).unwrap();
        assert_eq!(config.line.api_base_url, "http://127.0.0.1:9000");
        assert!(!config.gateway.group_resolution);
        assert_eq!(config.gateway.error_mode, ErrorMode::Propagate);
        assert_eq!(config.gateway.groups.get("sales"), Some("C1"));
        assert_eq!(config.gateway.groups.get("ops"), Some("C2"));
        // built-in entries are kept when only the env adds mappings
        assert_eq!(config.gateway.groups.len(), 3);
    }

    #[test]
    fn test_invalid_error_mode() {
        let mut vars = required();
        vars.push(("LINE_ERROR_MODE", "ignore"));
        let err = Config::from_lookup(None, env(&vars)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_group_resolution_flag_is_strict() {
        for value in ["0", "no", "off", "yes"] {
            let mut vars = required();
            vars.push(("LINE_GROUP_RESOLUTION", value));
            let err = Config::from_lookup(None, env(&vars)).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{} should be rejected", value);
        }

        let mut vars = required();
        vars.push(("LINE_GROUP_RESOLUTION", "TRUE"));
        assert!(Config::from_lookup(None, env(&vars)).unwrap().gateway.group_resolution);
    }

    #[test]
    fn test_toml_file_rejects_empty_group_id() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[groups]\n\"kitchen\" = \"C1\"\n\"broken\" = \"\"\n").unwrap();

        let err = Config::from_toml_file_with(file.path(), env(&required())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_parse_pairs_rejects_malformed() {
        assert!(GroupMappings::parse_pairs("no-separator").is_err());
        assert!(GroupMappings::parse_pairs("=C1").is_err());
        assert!(GroupMappings::parse_pairs("").unwrap().is_empty());
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[line]
api_base_url = "${{MOCK_LINE_URL}}"

[gateway]
group_resolution = true
error_mode = "propagate"

[groups]
"kitchen" = "C100"
"warehouse" = "C200"
"#
        )
        .unwrap();

        let mut vars = required();
        vars.push(("MOCK_LINE_URL", "http://localhost:1234"));

        let config = Config::from_toml_file_with(file.path(), env(&vars)).unwrap();
        assert_eq!(config.line.api_base_url, "http://localhost:1234");
        assert_eq!(config.gateway.error_mode, ErrorMode::Propagate);
        assert_eq!(config.gateway.groups.len(), 2);
        assert_eq!(config.gateway.groups.get("warehouse"), Some("C200"));
        assert_eq!(config.gateway.groups.get("大同訂貨測試"), None);
    }

    #[test]
    fn test_toml_file_still_requires_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[groups]\n\"a\" = \"C1\"\n").unwrap();

        let err = Config::from_toml_file_with(file.path(), env(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("CHANNEL_ACCESS_TOKEN")));
    }

    #[test]
    fn test_expand_env_vars() {
        let lookup = env(&[("LINE_TEST_VAR", "value")]);
        assert_eq!(expand_env_vars("a_${LINE_TEST_VAR}_b", &lookup), "a_value_b");
        assert_eq!(expand_env_vars("a_${NONEXISTENT}_b", &lookup), "a__b");
        assert_eq!(expand_env_vars("${}_content", &lookup), "_content");
        assert_eq!(expand_env_vars("no_vars_here", &lookup), "no_vars_here");
        assert_eq!(expand_env_vars("open_${BROKEN", &lookup), "open_${BROKEN");
    }

    #[test]
    fn test_gateway_config_builders() {
        let config = GatewayConfig::new("U1")
            .with_groups(GroupMappings::new())
            .with_group_resolution(false)
            .with_error_mode(ErrorMode::Propagate);
        assert!(config.groups.is_empty());
        assert!(!config.group_resolution);
        assert_eq!(config.error_mode, ErrorMode::Propagate);
    }
}
