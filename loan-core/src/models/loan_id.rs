use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every application code.
pub const LOAN_ID_PREFIX: &str = "IP-";

/// Symbols a code body is drawn from.
///
/// 24 letters without `I`/`O` plus the digits `2`-`9`, so no pair of
/// symbols is easy to confuse when read aloud or copied by hand.
pub const LOAN_ID_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Body length of a regular, verified code.
pub const LOAN_ID_LEN: usize = 8;

/// Body length of the unverified fallback code.
pub const LOAN_ID_FALLBACK_LEN: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanIdError {
    #[error("loan id must start with 'IP-': {0}")]
    MissingPrefix(String),

    #[error("loan id body must be 8 or 10 symbols, got {0}")]
    InvalidLength(usize),

    #[error("loan id contains symbol '{0}' outside the allowed alphabet")]
    InvalidSymbol(char),
}

/// Human-shareable application code, e.g. `IP-7K3MZQ2H`.
///
/// Doubles as the document key in the application store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(String);

impl LoanId {
    /// Draws a fresh candidate with a body of `len` symbols.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        len: usize,
    ) -> Self {
        let body: String = (0..len)
            .map(|_| LOAN_ID_ALPHABET[rng.gen_range(0..LOAN_ID_ALPHABET.len())] as char)
            .collect();
        Self(format!("{LOAN_ID_PREFIX}{body}"))
    }

    /// Parses user input. Surrounding whitespace is ignored and lowercase
    /// letters are accepted.
    pub fn parse(s: &str) -> Result<Self, LoanIdError> {
        let normalized = s.trim().to_ascii_uppercase();
        let body = normalized
            .strip_prefix(LOAN_ID_PREFIX)
            .ok_or_else(|| LoanIdError::MissingPrefix(s.to_string()))?;

        let len = body.chars().count();
        if len != LOAN_ID_LEN && len != LOAN_ID_FALLBACK_LEN {
            return Err(LoanIdError::InvalidLength(len));
        }
        if let Some(bad) = body.chars().find(|c| !is_alphabet_symbol(*c)) {
            return Err(LoanIdError::InvalidSymbol(bad));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbols after the `IP-` prefix.
    pub fn body(&self) -> &str {
        self.0.strip_prefix(LOAN_ID_PREFIX).unwrap_or(&self.0)
    }
}

fn is_alphabet_symbol(c: char) -> bool {
    c.is_ascii() && LOAN_ID_ALPHABET.contains(&(c as u8))
}

impl fmt::Display for LoanId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LoanId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
