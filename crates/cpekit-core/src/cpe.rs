//! CPE (Common Platform Enumeration) record
//!
//! Parses the legacy URI binding and serializes a record to the URI binding,
//! the well-formed name (WFN) and the CPE 2.3 formatted string binding.
//!
//! ```text
//! cpe:/a:microsoft:internet_explorer:8.0.6001:beta
//! wfn:[part="a",vendor="microsoft",product="internet_explorer",version="8.0.6001",update="beta"]
//! cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*
//! ```

use crate::error::{Error, Result};
use crate::format::Format;
use crate::part::CpePart;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{ErrorKind, Read};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Token the formatted binding uses for an unset attribute
const WILDCARD: &str = "*";

/// Positional slots of the URI binding, including the `cpe` literal.
/// Anything past the last slot stays in the language field.
const URI_SLOTS: usize = 8;

/// Optional attributes in binding order
static OPTIONAL_ATTRIBUTES: [(&str, fn(&Cpe) -> Option<&str>); 8] = [
    ("version", Cpe::version),
    ("update", Cpe::update),
    ("edition", Cpe::edition),
    ("language", Cpe::language),
    ("sw_edition", Cpe::sw_edition),
    ("target_sw", Cpe::target_sw),
    ("target_hw", Cpe::target_hw),
    ("other", Cpe::other),
];

/// Whitespace as the URI grammar sees it: ASCII only, including vertical tab
fn is_cpe_whitespace(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

fn uri_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"^cpe:/[hoa]:").expect("CPE URI prefix pattern is valid")
    })
}

/// Unvalidated field set accepted by [`Cpe::new`]
///
/// `None` means unset, which is not the same as `Some("")`: an empty
/// optional attribute still occupies a segment in the URI binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpeFields {
    pub part: Option<String>,
    pub vendor: Option<String>,
    pub product: Option<String>,
    pub version: Option<String>,
    pub update: Option<String>,
    pub edition: Option<String>,
    pub language: Option<String>,
    pub sw_edition: Option<String>,
    pub target_sw: Option<String>,
    pub target_hw: Option<String>,
    pub other: Option<String>,
    pub title: Option<String>,
}

impl CpeFields {
    fn slots_mut(&mut self) -> [(&'static str, &mut Option<String>); 12] {
        [
            ("part", &mut self.part),
            ("vendor", &mut self.vendor),
            ("product", &mut self.product),
            ("version", &mut self.version),
            ("update", &mut self.update),
            ("edition", &mut self.edition),
            ("language", &mut self.language),
            ("sw_edition", &mut self.sw_edition),
            ("target_sw", &mut self.target_sw),
            ("target_hw", &mut self.target_hw),
            ("other", &mut self.other),
            ("title", &mut self.title),
        ]
    }
}

/// A validated CPE record
///
/// Vendor and product are always non-empty. The part may be absent
/// ("partless"), in which case it renders empty in the URI and WFN bindings
/// and as `*` in the formatted binding.
///
/// Records are immutable; to change a field, take [`Cpe::to_fields`], edit
/// it and build a new record so validation runs again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CpeFields")]
pub struct Cpe {
    #[serde(skip_serializing_if = "Option::is_none")]
    part: Option<CpePart>,
    vendor: String,
    product: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sw_edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_sw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_hw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl Cpe {
    /// Validate a field set and build a record from it.
    ///
    /// No case folding or trimming happens here; that is left to parsing and
    /// serialization.
    pub fn new(fields: CpeFields) -> Result<Self> {
        Self::validate(fields).map_err(|e| {
            debug!("Rejected CPE fields ({}): {}", e.code(), e);
            e
        })
    }

    fn validate(fields: CpeFields) -> Result<Self> {
        let part = fields
            .part
            .as_deref()
            .map(str::parse::<CpePart>)
            .transpose()?;
        let vendor = required("vendor", fields.vendor)?;
        let product = required("product", fields.product)?;

        Ok(Self {
            part,
            vendor,
            product,
            version: fields.version,
            update: fields.update,
            edition: fields.edition,
            language: fields.language,
            sw_edition: fields.sw_edition,
            target_sw: fields.target_sw,
            target_hw: fields.target_hw,
            other: fields.other,
            title: fields.title,
        })
    }

    /// Start a builder for a record with the three mandatory attributes
    pub fn builder(
        part: CpePart,
        vendor: impl Into<String>,
        product: impl Into<String>,
    ) -> CpeBuilder {
        CpeBuilder::new(part, vendor, product)
    }

    /// Create a new CPE for an application
    pub fn application(vendor: impl Into<String>, product: impl Into<String>) -> Result<Self> {
        Self::builder(CpePart::Application, vendor, product).build()
    }

    /// Create a new CPE for an operating system
    pub fn os(vendor: impl Into<String>, product: impl Into<String>) -> Result<Self> {
        Self::builder(CpePart::OperatingSystem, vendor, product).build()
    }

    /// Create a new CPE for a hardware device
    pub fn hardware(vendor: impl Into<String>, product: impl Into<String>) -> Result<Self> {
        Self::builder(CpePart::Hardware, vendor, product).build()
    }

    /// Build a record from a dynamic field configuration.
    ///
    /// The value must be a JSON object whose recognised options are strings
    /// or `null`. Unrecognised keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "CPE fields must be an object, got {}",
                value_kind(value)
            ))
        })?;

        let mut fields = CpeFields::default();
        for (name, slot) in fields.slots_mut() {
            match map.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::String(s)) => *slot = Some(s.clone()),
                Some(other) => {
                    return Err(Error::InvalidArgument(format!(
                        "option '{}' must be a string, got {}",
                        name,
                        value_kind(other)
                    )))
                }
            }
        }

        Self::new(fields)
    }

    /// Build a record from a JSON document holding a field configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Parse a URI binding such as `cpe:/o:microsoft:windows_xp:::pro`.
    ///
    /// Input is lower-cased and stripped of surrounding ASCII whitespace first. Trailing empty segments are
    /// tolerated, and colons beyond the language slot are kept inside the
    /// language value.
    pub fn parse(input: &str) -> Result<Self> {
        let cpe = input.trim_matches(is_cpe_whitespace).to_lowercase();

        if !uri_prefix().is_match(&cpe) {
            debug!("Rejected CPE without URI prefix: {:?}", input);
            return Err(Error::malformed(
                input,
                "expected 'cpe:/' followed by 'h', 'o' or 'a' and ':'",
            ));
        }
        if cpe.chars().any(is_cpe_whitespace) {
            debug!("Rejected CPE containing whitespace: {:?}", input);
            return Err(Error::malformed(input, "contains whitespace"));
        }

        let mut segments = cpe.splitn(URI_SLOTS, ':');
        // literal "cpe"
        segments.next();
        let part = segments.next().map(|p| p.strip_prefix('/').unwrap_or(p));
        let mut next = || segments.next().map(String::from);

        let fields = CpeFields {
            part: part.map(String::from),
            vendor: next(),
            product: next(),
            version: next(),
            update: next(),
            edition: next(),
            language: next(),
            ..Default::default()
        };

        let parsed = Self::new(fields)?;
        debug!("Parsed CPE: {}", parsed);
        Ok(parsed)
    }

    /// Parse a URI binding read from a byte source
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(|e| {
            if e.kind() == ErrorKind::InvalidData {
                Error::malformed("<bytes>", "input is not valid UTF-8")
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Serialize in the requested binding
    pub fn generate(&self, format: Format) -> String {
        match format {
            Format::Uri => {
                let mut uri =
                    format!("cpe:/{}:{}:{}", self.part_code(), self.vendor, self.product);
                for (_, value) in self.attributes() {
                    if let Some(value) = value {
                        uri.push(':');
                        uri.push_str(value);
                    }
                }
                uri.to_lowercase()
            }
            Format::Wfn => {
                let mut wfn = format!(
                    "wfn:[part=\"{}\",vendor=\"{}\",product=\"{}\"",
                    self.part_code(),
                    self.vendor,
                    self.product
                );
                for (name, value) in self.attributes() {
                    if let Some(value) = value {
                        wfn.push_str(&format!(",{}=\"{}\"", name, value));
                    }
                }
                wfn.push(']');
                wfn
            }
            Format::Formatted => {
                let part = self.part.map_or(WILDCARD, |p| p.code());
                let mut formatted = format!("cpe:2.3:{}:{}:{}", part, self.vendor, self.product);
                for (_, value) in self.attributes() {
                    formatted.push(':');
                    formatted.push_str(value.unwrap_or(WILDCARD));
                }
                formatted.to_lowercase()
            }
        }
    }

    /// Serialize in the binding named by `selector` (`uri`, `wfn`, `formatted`)
    pub fn generate_named(&self, selector: &str) -> Result<String> {
        Ok(self.generate(selector.parse()?))
    }

    /// URI binding, e.g. `cpe:/a:microsoft:internet_explorer:8.0.6001:beta`
    pub fn to_uri(&self) -> String {
        self.generate(Format::Uri)
    }

    /// Well-formed name, e.g. `wfn:[part="a",vendor="microsoft",...]`
    pub fn to_wfn(&self) -> String {
        self.generate(Format::Wfn)
    }

    /// Formatted string binding, e.g. `cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*`
    pub fn to_formatted(&self) -> String {
        self.generate(Format::Formatted)
    }

    /// Compare against a dynamic value: a string is compared as a URI
    /// binding, an object is built into a record first.
    pub fn eq_value(&self, other: &Value) -> Result<bool> {
        match other {
            Value::String(s) => Ok(self == s),
            Value::Object(_) => Ok(*self == Self::from_json(other)?),
            _ => Err(Error::InvalidArgument(format!(
                "cannot compare a CPE with {}",
                value_kind(other)
            ))),
        }
    }

    /// Copy the record back out as an editable field set
    pub fn to_fields(&self) -> CpeFields {
        CpeFields {
            part: self.part.map(|p| p.code().to_string()),
            vendor: Some(self.vendor.clone()),
            product: Some(self.product.clone()),
            version: self.version.clone(),
            update: self.update.clone(),
            edition: self.edition.clone(),
            language: self.language.clone(),
            sw_edition: self.sw_edition.clone(),
            target_sw: self.target_sw.clone(),
            target_hw: self.target_hw.clone(),
            other: self.other.clone(),
            title: self.title.clone(),
        }
    }

    fn part_code(&self) -> &'static str {
        self.part.map_or("", |p| p.code())
    }

    fn attributes(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        OPTIONAL_ATTRIBUTES
            .iter()
            .map(move |(name, get)| (*name, get(self)))
    }

    /// Part: 'h' (hardware), 'o' (OS), 'a' (application), or `None` when partless
    pub fn part(&self) -> Option<CpePart> {
        self.part
    }

    /// Vendor name
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Product name
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Version string
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Update or patch level
    pub fn update(&self) -> Option<&str> {
        self.update.as_deref()
    }

    /// Legacy edition
    pub fn edition(&self) -> Option<&str> {
        self.edition.as_deref()
    }

    /// Language tag
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Software edition
    pub fn sw_edition(&self) -> Option<&str> {
        self.sw_edition.as_deref()
    }

    /// Target software
    pub fn target_sw(&self) -> Option<&str> {
        self.target_sw.as_deref()
    }

    /// Target hardware
    pub fn target_hw(&self) -> Option<&str> {
        self.target_hw.as_deref()
    }

    /// Other attributes
    pub fn other(&self) -> Option<&str> {
        self.other.as_deref()
    }

    /// Human-readable label; not part of the record's identity
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingField { field })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<CpeFields> for Cpe {
    type Error = Error;

    fn try_from(fields: CpeFields) -> Result<Self> {
        Cpe::new(fields)
    }
}

impl fmt::Display for Cpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl FromStr for Cpe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Cpe::parse(s)
    }
}

// Identity is the URI binding, so records with different field sets can
// still be equal.
impl PartialEq for Cpe {
    fn eq(&self, other: &Cpe) -> bool {
        self.to_uri() == other.to_uri()
    }
}

impl Eq for Cpe {}

impl Hash for Cpe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_uri().hash(state);
    }
}

impl PartialEq<str> for Cpe {
    fn eq(&self, other: &str) -> bool {
        self.to_uri() == other
    }
}

impl PartialEq<&str> for Cpe {
    fn eq(&self, other: &&str) -> bool {
        self.to_uri() == *other
    }
}

impl PartialEq<String> for Cpe {
    fn eq(&self, other: &String) -> bool {
        self.to_uri() == *other
    }
}

impl PartialEq<Cpe> for str {
    fn eq(&self, other: &Cpe) -> bool {
        other == self
    }
}

impl PartialEq<Cpe> for &str {
    fn eq(&self, other: &Cpe) -> bool {
        other == *self
    }
}

impl PartialEq<Cpe> for String {
    fn eq(&self, other: &Cpe) -> bool {
        other == self
    }
}

/// Builder for constructing a [`Cpe`]
pub struct CpeBuilder {
    fields: CpeFields,
}

impl CpeBuilder {
    pub fn new(part: CpePart, vendor: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            fields: CpeFields {
                part: Some(part.code().to_string()),
                vendor: Some(vendor.into()),
                product: Some(product.into()),
                ..Default::default()
            },
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.fields.version = Some(version.into());
        self
    }

    pub fn update(mut self, update: impl Into<String>) -> Self {
        self.fields.update = Some(update.into());
        self
    }

    pub fn edition(mut self, edition: impl Into<String>) -> Self {
        self.fields.edition = Some(edition.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.fields.language = Some(language.into());
        self
    }

    pub fn sw_edition(mut self, sw_edition: impl Into<String>) -> Self {
        self.fields.sw_edition = Some(sw_edition.into());
        self
    }

    pub fn target_sw(mut self, target_sw: impl Into<String>) -> Self {
        self.fields.target_sw = Some(target_sw.into());
        self
    }

    pub fn target_hw(mut self, target_hw: impl Into<String>) -> Self {
        self.fields.target_hw = Some(target_hw.into());
        self
    }

    pub fn other(mut self, other: impl Into<String>) -> Self {
        self.fields.other = Some(other.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.fields.title = Some(title.into());
        self
    }

    pub fn build(self) -> Result<Cpe> {
        Cpe::new(self.fields)
    }
}
