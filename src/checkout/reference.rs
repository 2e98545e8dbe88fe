//! Reference codes

use std::{fmt, str::FromStr};

use rand::Rng;
use thiserror::Error;

const PREFIX: &str = "REF";
const DIGITS: usize = 6;
const UPPER_BOUND: u32 = 1_000_000;

/// Returned when parsing a string that is not `REF` followed by six digits.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("malformed reference code: {0}")]
pub struct MalformedReference(String);

/// Mock payment reference: `REF` followed by six zero-padded digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    /// Draws a new reference code from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let number = rng.gen_range(0..UPPER_BOUND);

        Self(format!("{PREFIX}{number:0DIGITS$}"))
    }

    /// The code as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReferenceCode {
    type Err = MalformedReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s
            .strip_prefix(PREFIX)
            .is_some_and(|digits| digits.len() == DIGITS && digits.bytes().all(|b| b.is_ascii_digit()));

        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(MalformedReference(s.to_string()))
        }
    }
}
