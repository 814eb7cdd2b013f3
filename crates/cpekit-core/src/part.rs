//! CPE part: the top-level product category

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Part: 'h' (hardware), 'o' (OS), 'a' (application)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpePart {
    #[serde(rename = "h")]
    Hardware,
    #[serde(rename = "o")]
    OperatingSystem,
    #[serde(rename = "a")]
    Application,
}

impl CpePart {
    /// Single-character code used in every binding
    pub fn code(&self) -> &'static str {
        match self {
            CpePart::Hardware => "h",
            CpePart::OperatingSystem => "o",
            CpePart::Application => "a",
        }
    }
}

impl fmt::Display for CpePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CpePart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(CpePart::Hardware),
            "o" => Ok(CpePart::OperatingSystem),
            "a" => Ok(CpePart::Application),
            _ => Err(Error::InvalidPartCode {
                part: s.to_string(),
            }),
        }
    }
}
