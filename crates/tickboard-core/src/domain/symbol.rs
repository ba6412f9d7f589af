use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Uppercase ticker used as the identity key of a quote.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim and uppercase `input`, then check it looks like a ticker.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        let mut chars = normalized.chars();
        match chars.next() {
            None => return Err(ValidationError::EmptySymbol),
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
            Some(_) => {}
        }

        if let Some((index, ch)) = normalized
            .char_indices()
            .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-'))
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        if normalized.len() > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len: normalized.len(),
                max: MAX_SYMBOL_LEN,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match used by the table search box.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        needle.is_empty() || self.0.contains(&needle.to_ascii_uppercase())
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
