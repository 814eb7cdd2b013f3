//! Output binding selector

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Textual encoding to emit a CPE in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Legacy URI binding, `cpe:/a:vendor:product:version`
    #[default]
    Uri,
    /// Well-formed name, `wfn:[part="a",vendor="vendor",...]`
    Wfn,
    /// CPE 2.3 formatted string, `cpe:2.3:a:vendor:product:*:...`
    Formatted,
}

impl Format {
    /// Selector name accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            Format::Uri => "uri",
            Format::Wfn => "wfn",
            Format::Formatted => "formatted",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim();
        let name = selector.strip_prefix(':').unwrap_or(selector);
        match name.to_lowercase().as_str() {
            "uri" => Ok(Format::Uri),
            "wfn" => Ok(Format::Wfn),
            "formatted" => Ok(Format::Formatted),
            _ => Err(Error::InvalidArgument(format!(
                "unsupported format selector '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_default_is_uri() {
        assert_eq!(Format::default(), Format::Uri);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("wfn".parse::<Format>().unwrap(), Format::Wfn);
        assert_eq!(":formatted".parse::<Format>().unwrap(), Format::Formatted);
        assert_eq!("URI".parse::<Format>().unwrap(), Format::Uri);
    }

    #[test]
    fn test_unknown_format_names_selector() {
        let err = "xml".parse::<Format>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("'xml'"));
    }
}
