//! Office aggregate and join codes.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use officeline_core::{AppError, AppResult, NonEmptyString, OfficeId};
use serde::{Deserialize, Serialize};

/// Number of symbols in a join code.
pub const JOIN_CODE_LENGTH: usize = 6;

/// Symbols a join code is drawn from.
pub const JOIN_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Largest multiple of the alphabet size that fits in a byte. Bytes at or
// above it are rejected so that every symbol stays equally likely.
const REJECTION_BOUND: u8 = 252;

/// Six-symbol code a new member presents to join an office.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JoinCode(String);

impl JoinCode {
    /// Parses user input into a join code.
    ///
    /// Input is upper-cased and stripped of everything that is not an ASCII
    /// letter or digit before the length check, so `"ab-12 cd"` parses as
    /// `AB12CD`.
    pub fn parse(input: &str) -> AppResult<Self> {
        let normalized: String = input
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|character| character.to_ascii_uppercase())
            .collect();

        if normalized.len() != JOIN_CODE_LENGTH {
            return Err(AppError::Validation(format!(
                "join code must contain exactly {JOIN_CODE_LENGTH} letters or digits, got {}",
                normalized.len()
            )));
        }

        Ok(Self(normalized))
    }

    /// Builds a code from random bytes using rejection sampling.
    ///
    /// Returns `None` when the bytes did not contain enough accepted values;
    /// the caller should draw a fresh buffer.
    #[must_use]
    pub fn from_random_bytes(bytes: &[u8]) -> Option<Self> {
        let code: String = bytes
            .iter()
            .filter(|byte| **byte < REJECTION_BOUND)
            .take(JOIN_CODE_LENGTH)
            .map(|byte| char::from(JOIN_CODE_ALPHABET[usize::from(*byte) % JOIN_CODE_ALPHABET.len()]))
            .collect();

        (code.len() == JOIN_CODE_LENGTH).then_some(Self(code))
    }

    /// Returns the code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for JoinCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl From<JoinCode> for String {
    fn from(value: JoinCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for JoinCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

/// The tenant that owns members, shifts, tasks, inventory and messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    id: OfficeId,
    name: NonEmptyString,
    description: Option<String>,
    join_code: JoinCode,
    created_at: DateTime<Utc>,
}

impl Office {
    /// Creates a validated office.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        join_code: JoinCode,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: OfficeId::new(),
            name: NonEmptyString::for_field("office name", name)?,
            description: normalize_description(description),
            join_code,
            created_at,
        })
    }

    /// Returns the office id.
    #[must_use]
    pub fn id(&self) -> OfficeId {
        self.id
    }

    /// Returns the office name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the join code.
    #[must_use]
    pub fn join_code(&self) -> &JoinCode {
        &self.join_code
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces name and description. Code, id and creation time never change.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> AppResult<()> {
        self.name = NonEmptyString::for_field("office name", name)?;
        self.description = normalize_description(description);
        Ok(())
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
