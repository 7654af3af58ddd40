use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct AccountId(u32);

impl AccountId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `None` once the id space is used up
    pub(crate) fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccountError {
    #[error("Unknown account type - {0}. Expected LDAP or Local")]
    UnknownType(String),
}

/// Where the account authenticates against
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountType {
    /// Credentials live in a directory service, no password is kept locally
    #[serde(rename = "LDAP")]
    Ldap,

    /// Credentials are kept with the record itself
    #[default]
    #[serde(alias = "Локальная")]
    Local,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Ldap => write!(f, "LDAP"),
            AccountType::Local => write!(f, "Local"),
        }
    }
}

impl FromStr for AccountType {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("ldap") => Ok(AccountType::Ldap),
            s if s.eq_ignore_ascii_case("local") || s == "Локальная" => Ok(AccountType::Local),
            other => Err(AccountError::UnknownType(other.to_string())),
        }
    }
}

/// A single tag shown on the account, in display order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Label {
    pub text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Managed login record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Account {
    pub id: AccountId,

    pub label: Vec<Label>,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    pub login: String,

    /// `None` is the absent marker, meant for LDAP accounts. Nothing enforces the pairing.
    pub password: Option<String>,

    /// Maintained by the form layer, the store only carries it around
    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

impl Account {
    /// A blank record as the form shows it before anything is typed in
    pub(crate) fn new(id: AccountId) -> Self {
        Self {
            id,
            label: Vec::new(),
            account_type: AccountType::default(),
            login: String::new(),
            password: Some(String::new()),
            is_valid: false,
        }
    }
}
