//! Dictionary entry projection of a CPE record
//!
//! Carries the pieces an XML dictionary writer needs (URI name, 2.3 name,
//! title and its language). Escaping and emission are left to the writer.

use crate::cpe::Cpe;
use serde::{Deserialize, Serialize};

/// Language used for a title when the record carries none
pub const DEFAULT_TITLE_LANG: &str = "en-US";

/// One `cpe-item` of a CPE dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// URI binding
    pub name: String,
    /// Formatted (2.3) binding
    pub cpe23_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<DictionaryTitle>,
}

/// Title element of a dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryTitle {
    pub lang: String,
    pub text: String,
}

impl Cpe {
    /// Project this record into a dictionary entry
    pub fn dictionary_entry(&self) -> DictionaryEntry {
        let title = self.title().map(|text| DictionaryTitle {
            lang: self
                .language()
                .filter(|lang| !lang.is_empty())
                .unwrap_or(DEFAULT_TITLE_LANG)
                .to_string(),
            text: text.to_string(),
        });

        DictionaryEntry {
            name: self.to_uri(),
            cpe23_name: self.to_formatted(),
            title,
        }
    }
}

impl From<&Cpe> for DictionaryEntry {
    fn from(cpe: &Cpe) -> Self {
        cpe.dictionary_entry()
    }
}
