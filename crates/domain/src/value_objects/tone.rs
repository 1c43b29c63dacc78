//! Writing tone requested from the generation service

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Tone of the generated message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Technical,
    Formal,
}

impl Tone {
    /// Wire value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Technical => "technical",
            Self::Formal => "formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Self::Professional),
            "technical" => Ok(Self::Technical),
            "formal" => Ok(Self::Formal),
            other => Err(DomainError::InvalidValue(format!("unknown tone '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_display() {
        for tone in [Tone::Professional, Tone::Technical, Tone::Formal] {
            assert_eq!(tone.to_string().parse::<Tone>().unwrap(), tone);
        }
    }

    #[test]
    fn unknown_tone_is_rejected() {
        assert!("casual".parse::<Tone>().is_err());
    }
}
