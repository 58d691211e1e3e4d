//! Gate configuration.
//!
//! The host hands over a JSON object once at startup:
//!
//! ```json
//! {
//!   "paramName": "Token",
//!   "allowedValues": ["my-secret", "another-secret"],
//!   "denyStatus": 401,
//!   "devMode": false
//! }
//! ```
//!
//! `denyStatus` may also be a digit string (`"403"`); anything else fails the
//! whole parse. `devMode` is enabled by `true` or any casing of `"true"`;
//! every other value, including garbage, leaves it disabled.

use serde::Deserialize;

use crate::allow::AllowSet;
use crate::error::{ConfigError, ConfigViolation, ConfigViolationKind};

/// Status used when `denyStatus` is absent or zero.
pub const DEFAULT_DENY_STATUS: u16 = 401;

mod serde_fields {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize_deny_status<'de, D>(d: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<Value> = Option::deserialize(d)?;
        match opt {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(num)) => num.as_i64().ok_or_else(|| {
                serde::de::Error::custom(format!("denyStatus must be an integer, got: {num}"))
            }),
            Some(Value::String(s)) => {
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(serde::de::Error::custom(format!(
                        "denyStatus string {s:?} must contain only digits"
                    )));
                }
                s.parse::<i64>().map_err(|e| {
                    serde::de::Error::custom(format!("denyStatus string {s:?} is not a number: {e}"))
                })
            }
            Some(other) => Err(serde::de::Error::custom(format!(
                "denyStatus must be a number or numeric string, got: {other}"
            ))),
        }
    }

    pub fn deserialize_dev_mode<'de, D>(d: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<Value> = Option::deserialize(d)?;
        Ok(match opt {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    param_name: Option<String>,
    #[serde(default)]
    allowed_values: Option<Vec<String>>,
    #[serde(default, deserialize_with = "serde_fields::deserialize_deny_status")]
    deny_status: i64,
    #[serde(default, deserialize_with = "serde_fields::deserialize_dev_mode")]
    dev_mode: bool,
}

/// Validated, immutable gate configuration.
///
/// Built once at startup and read-only afterwards. `Debug` output never
/// includes the allowed token values.
///
/// # Examples
///
/// ```
/// use query_token_gate::parse_config;
///
/// let config = parse_config(br#"{
///     "paramName": "Token",
///     "allowedValues": ["a", "b"],
///     "denyStatus": "403",
///     "devMode": "TRUE"
/// }"#).expect("valid config");
///
/// assert_eq!(config.param_name(), "Token");
/// assert_eq!(config.deny_status(), 403);
/// assert!(config.dev_mode());
/// assert!(config.allowed_values().contains("b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    param_name: String,
    allowed_values: AllowSet,
    deny_status: u16,
    dev_mode: bool,
}

impl GateConfig {
    /// Builds a configuration programmatically.
    ///
    /// The deny status starts at [`DEFAULT_DENY_STATUS`] and dev mode is off.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigViolation`] if `param_name` is empty or
    /// `allowed_values` yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_token_gate::GateConfig;
    ///
    /// let config = GateConfig::new("Token", ["secret"])
    ///     .expect("valid config")
    ///     .with_deny_status(403)
    ///     .with_dev_mode(true);
    ///
    /// assert_eq!(config.deny_status(), 403);
    /// assert!(GateConfig::new("", ["secret"]).is_err());
    /// ```
    pub fn new<I, S>(param_name: impl Into<String>, allowed_values: I) -> Result<Self, ConfigViolation>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let param_name = param_name.into();
        let allowed_values: AllowSet = allowed_values.into_iter().collect();
        validate_required(&param_name, allowed_values.len())?;

        Ok(Self {
            param_name,
            allowed_values,
            deny_status: DEFAULT_DENY_STATUS,
            dev_mode: false,
        })
    }

    /// Parses and validates the JSON configuration blob.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON or an unusable `denyStatus`
    /// encoding; [`ConfigError::Invalid`] for missing required fields or an
    /// out-of-range status.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let param_name = raw.param_name.unwrap_or_default();
        let allowed_values = raw.allowed_values.unwrap_or_default();
        validate_required(&param_name, allowed_values.len())?;

        Ok(Self {
            param_name,
            allowed_values: allowed_values.into_iter().collect(),
            deny_status: normalize_deny_status(raw.deny_status)?,
            dev_mode: raw.dev_mode,
        })
    }

    /// Replaces the deny status. Zero selects [`DEFAULT_DENY_STATUS`].
    pub fn with_deny_status(mut self, status: u16) -> Self {
        self.deny_status = if status == 0 { DEFAULT_DENY_STATUS } else { status };
        self
    }

    /// Enables or disables diagnostic denial bodies.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Name of the query parameter carrying the token.
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Tokens that admit a request.
    pub fn allowed_values(&self) -> &AllowSet {
        &self.allowed_values
    }

    /// Status sent with every denial.
    pub fn deny_status(&self) -> u16 {
        self.deny_status
    }

    /// Whether denials carry a diagnostic body.
    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }
}

/// Parses the JSON configuration blob supplied by the host.
///
/// Same as [`GateConfig::from_json`].
///
/// # Examples
///
/// ```
/// use query_token_gate::{parse_config, ConfigError};
///
/// let ok = parse_config(br#"{"paramName":"Token","allowedValues":["a"]}"#).unwrap();
/// assert_eq!(ok.deny_status(), 401);
///
/// let bad = parse_config(br#"{"paramName":"Token","allowedValues":["a"],"denyStatus":"bad"}"#);
/// assert!(matches!(bad, Err(ConfigError::Parse(_))));
/// ```
pub fn parse_config(bytes: &[u8]) -> Result<GateConfig, ConfigError> {
    GateConfig::from_json(bytes)
}

fn validate_required(param_name: &str, allowed_len: usize) -> Result<(), ConfigViolation> {
    if param_name.is_empty() {
        return Err(ConfigViolation::new(
            ConfigViolationKind::MissingParamName,
            "paramName and allowedValues are required",
        ));
    }
    if allowed_len == 0 {
        return Err(ConfigViolation::new(
            ConfigViolationKind::MissingAllowedValues,
            "paramName and allowedValues are required",
        ));
    }
    Ok(())
}

fn normalize_deny_status(status: i64) -> Result<u16, ConfigViolation> {
    if status == 0 {
        return Ok(DEFAULT_DENY_STATUS);
    }
    u16::try_from(status).map_err(|_| {
        ConfigViolation::new(
            ConfigViolationKind::DenyStatusOutOfRange { status },
            "denyStatus must fit in an unsigned 16-bit status code",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<GateConfig, ConfigError> {
        parse_config(json.as_bytes())
    }

    #[test]
    fn deny_status_encodings() {
        let cases = [
            (r#"{"paramName":"Token","allowedValues":["a"],"denyStatus":"401"}"#, 401),
            (r#"{"paramName":"Token","allowedValues":["a"],"denyStatus":403}"#, 403),
            (r#"{"paramName":"Token","allowedValues":["a"],"denyStatus":"403"}"#, 403),
            (r#"{"paramName":"Token","allowedValues":["a"]}"#, 401),
            (r#"{"paramName":"Token","allowedValues":["a"],"denyStatus":0}"#, 401),
            (r#"{"paramName":"Token","allowedValues":["a"],"denyStatus":"0"}"#, 401),
            (r#"{"paramName":"Token","allowedValues":["a"],"denyStatus":null}"#, 401),
        ];
        for (json, want) in cases {
            let config = parse(json).unwrap_or_else(|e| panic!("{json}: {e}"));
            assert_eq!(config.deny_status(), want, "{json}");
        }
    }

    #[test]
    fn malformed_deny_status_is_a_parse_error() {
        for status in [
            r#""bad""#,
            r#""""#,
            r#""+403""#,
            r#""-401""#,
            r#"" 403""#,
            "4.5",
            "true",
            "[401]",
            r#"{"code":401}"#,
        ] {
            let json = format!(
                r#"{{"paramName":"Token","allowedValues":["a"],"denyStatus":{status}}}"#
            );
            assert!(
                matches!(parse(&json), Err(ConfigError::Parse(_))),
                "denyStatus {status} should fail to parse"
            );
        }
    }

    #[test]
    fn out_of_range_deny_status_is_invalid() {
        for status in ["-1", "-401", "65536", r#""70000""#] {
            let json = format!(
                r#"{{"paramName":"Token","allowedValues":["a"],"denyStatus":{status}}}"#
            );
            match parse(&json) {
                Err(ConfigError::Invalid(v)) => assert!(matches!(
                    v.kind,
                    ConfigViolationKind::DenyStatusOutOfRange { .. }
                )),
                other => panic!("denyStatus {status}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn any_u16_deny_status_is_accepted() {
        for (status, want) in [("1", 1), ("99", 99), ("1000", 1000), (r#""65535""#, 65535)] {
            let json = format!(
                r#"{{"paramName":"Token","allowedValues":["a"],"denyStatus":{status}}}"#
            );
            let config = parse(&json).unwrap_or_else(|e| panic!("denyStatus {status}: {e}"));
            assert_eq!(config.deny_status(), want);
        }
    }

    #[test]
    fn dev_mode_encodings() {
        let cases = [
            ("true", true),
            (r#""true""#, true),
            (r#""TRUE""#, true),
            (r#""True""#, true),
            ("false", false),
            (r#""false""#, false),
            (r#""yes""#, false),
            ("1", false),
            ("null", false),
            ("[true]", false),
            (r#"{"on":true}"#, false),
        ];
        for (dev_mode, want) in cases {
            let json = format!(
                r#"{{"paramName":"Token","allowedValues":["a"],"devMode":{dev_mode}}}"#
            );
            let config = parse(&json).unwrap_or_else(|e| panic!("devMode {dev_mode}: {e}"));
            assert_eq!(config.dev_mode(), want, "devMode {dev_mode}");
        }
    }

    #[test]
    fn dev_mode_defaults_off() {
        let config = parse(r#"{"paramName":"Token","allowedValues":["a"]}"#).unwrap();
        assert!(!config.dev_mode());
    }

    #[test]
    fn missing_param_name_is_invalid() {
        for json in [
            r#"{"allowedValues":["a"]}"#,
            r#"{"paramName":"","allowedValues":["a"]}"#,
            r#"{"paramName":null,"allowedValues":["a"]}"#,
        ] {
            match parse(json) {
                Err(ConfigError::Invalid(v)) => {
                    assert_eq!(v.kind, ConfigViolationKind::MissingParamName, "{json}")
                }
                other => panic!("{json}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn missing_allowed_values_is_invalid() {
        for json in [
            r#"{"paramName":"Token"}"#,
            r#"{"paramName":"Token","allowedValues":[]}"#,
        ] {
            match parse(json) {
                Err(ConfigError::Invalid(v)) => {
                    assert_eq!(v.kind, ConfigViolationKind::MissingAllowedValues, "{json}")
                }
                other => panic!("{json}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn json_syntax_errors_are_parse_errors() {
        for json in ["", "{", "42", "null", r#"{"paramName":1,"allowedValues":["a"]}"#] {
            assert!(
                matches!(parse(json), Err(ConfigError::Parse(_))),
                "{json:?} should fail to parse"
            );
        }
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config =
            parse(r#"{"paramName":"Token","allowedValues":["a"],"extra":{"x":1}}"#).unwrap();
        assert_eq!(config.param_name(), "Token");
    }

    #[test]
    fn allowed_values_become_a_set() {
        let config = parse(r#"{"paramName":"t","allowedValues":["b","a","b"]}"#).unwrap();
        assert_eq!(config.allowed_values().len(), 2);
        assert!(config.allowed_values().contains("a"));
        assert!(config.allowed_values().contains("b"));
    }

    #[test]
    fn debug_output_hides_tokens() {
        let config = parse(r#"{"paramName":"t","allowedValues":["sk-hidden"]}"#).unwrap();
        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains("AllowSet { len: 1 }"));
        assert!(!debug_output.contains("sk-hidden"));
    }

    #[test]
    fn builder_applies_same_rules() {
        let config = GateConfig::new("t", vec!["x".to_string()]).unwrap();
        assert_eq!(config.deny_status(), DEFAULT_DENY_STATUS);
        assert!(!config.dev_mode());

        let config = config.with_deny_status(403);
        assert_eq!(config.deny_status(), 403);
        let config = config.with_deny_status(0);
        assert_eq!(config.deny_status(), DEFAULT_DENY_STATUS);

        assert!(GateConfig::new("t", Vec::<String>::new()).is_err());
        assert_eq!(GateConfig::new("t", ["x"]).unwrap().with_deny_status(42).deny_status(), 42);
    }
}
