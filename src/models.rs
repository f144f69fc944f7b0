use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Repository the check runs against, e.g. `case/dependabot-error-alerts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

impl RepositoryIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepositoryIdentity {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(AlertError::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Number of trailing days to search. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow(u32);

impl LookbackWindow {
    /// Reads the leading integer and ignores whatever follows it, so
    /// `"10days"` is 10 and `"1.5"` is 1. Values past `u32::MAX` saturate.
    pub fn parse(raw: &str) -> Result<Self, AlertError> {
        let invalid = || AlertError::InvalidLookbackDays(raw.to_string());

        let text = raw.trim_start();
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 || negative {
            return Err(invalid());
        }

        let days = unsigned[..digits_len].parse::<u32>().unwrap_or(u32::MAX);
        if days < 1 {
            return Err(invalid());
        }

        Ok(Self(days))
    }

    pub fn days(self) -> u32 {
        self.0
    }
}

/// One failed workflow run as reported in `failures_json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub failure_count: usize,
    pub has_failures: bool,
    pub failures: Vec<FailureRecord>,
}

impl CheckResult {
    pub fn from_failures(failures: Vec<FailureRecord>) -> Self {
        Self {
            failure_count: failures.len(),
            has_failures: !failures.is_empty(),
            failures,
        }
    }
}
