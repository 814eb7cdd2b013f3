//! cpekit core - Common Platform Enumeration identifiers
//!
//! This crate provides:
//! - `Cpe`: a validated CPE record with URI, WFN and 2.3 formatted-string output
//! - URI binding parsing, from text or a byte source
//! - Equality by URI binding, against records and raw strings
//! - `DictionaryEntry`: the fields a CPE dictionary writer consumes

pub mod cpe;
pub mod dictionary;
pub mod error;
pub mod format;
pub mod part;

// Re-export commonly used types at crate root
pub use cpe::{Cpe, CpeBuilder, CpeFields};
pub use dictionary::{DictionaryEntry, DictionaryTitle};
pub use error::{Error, Result};
pub use format::Format;
pub use part::CpePart;
