//! Check model and request parameters

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Check type sent on creation; the API does not allow changing it later
pub const CHECK_TYPE_HTTP: &str = "http";

/// Last known state of a check as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Up,
    Down,
    UnconfirmedDown,
    Paused,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Up => "up",
            CheckStatus::Down => "down",
            CheckStatus::UnconfirmedDown => "unconfirmed_down",
            CheckStatus::Paused => "paused",
            CheckStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A monitored endpoint.
///
/// Only `name` and `hostname` matter when creating or updating a check. The
/// identifier and every metric are assigned by the server and are left at
/// their zero value until a check has been read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Check {
    pub id: u64,
    pub name: String,
    /// Polling interval in minutes
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub resolution: u32,
    #[serde(
        rename = "sendtoemail",
        skip_serializing_if = "is_false",
        deserialize_with = "null_as_default"
    )]
    pub send_to_email: bool,
    #[serde(
        rename = "sendtotwitter",
        skip_serializing_if = "is_false",
        deserialize_with = "null_as_default"
    )]
    pub send_to_twitter: bool,
    #[serde(
        rename = "sendtoiphone",
        skip_serializing_if = "is_false",
        deserialize_with = "null_as_default"
    )]
    pub send_to_iphone: bool,
    #[serde(
        rename = "sendnotificationwhendown",
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub send_notification_when_down: u32,
    #[serde(
        rename = "notifyagainevery",
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub notify_again_every: u32,
    #[serde(
        rename = "notifywhenbackup",
        skip_serializing_if = "is_false",
        deserialize_with = "null_as_default"
    )]
    pub notify_when_backup: bool,
    /// Unix timestamp (seconds)
    #[serde(skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,
    #[serde(
        rename = "lasterrortime",
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub last_error_time: i64,
    #[serde(
        rename = "lasttesttime",
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub last_test_time: i64,
    /// Milliseconds
    #[serde(
        rename = "lastresponsetime",
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub last_response_time: i64,
}

impl Check {
    pub fn new(name: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hostname: hostname.into(),
            ..Self::default()
        }
    }

    /// Parameters for `POST /checks`
    pub fn create_params(&self) -> CheckParams<'_> {
        CheckParams {
            name: &self.name,
            host: &self.hostname,
            check_type: Some(CHECK_TYPE_HTTP),
        }
    }

    /// Parameters for `PUT /checks/{id}`
    pub fn update_params(&self) -> CheckParams<'_> {
        CheckParams {
            name: &self.name,
            host: &self.hostname,
            check_type: None,
        }
    }
}

/// Request parameters derived from a [`Check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckParams<'a> {
    name: &'a str,
    host: &'a str,
    check_type: Option<&'static str>,
}

impl<'a> CheckParams<'a> {
    /// Key/value pairs in alphabetical key order
    pub fn pairs(&self) -> Vec<(&'static str, &'a str)> {
        let mut pairs = vec![("host", self.host), ("name", self.name)];
        if let Some(check_type) = self.check_type {
            pairs.push(("type", check_type));
        }
        pairs
    }
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Metrics the server has not populated yet may arrive as `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
