use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const TYPE_KEY: &str = "type";
pub const CASHFLOW_KEY: &str = "cashflow";
pub const OUTPUTNAME_KEY: &str = "outputname";

/// Ordered key/value store where the first write of a key sticks.
///
/// Sections in `.cfg` files frequently repeat a key further down (copy/paste
/// of blocks); only the first declaration is honoured.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` only when it is not present yet. Returns `true` on insert.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One bracketed section of a `.cfg` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctorRecord {
    pub name: String,
    pub source_file: PathBuf,
    pub properties: PropertyMap,
}

impl FunctorRecord {
    pub fn new(name: impl Into<String>, source_file: &Path) -> Self {
        Self {
            name: name.into(),
            source_file: source_file.to_path_buf(),
            properties: PropertyMap::new(),
        }
    }

    /// Calculator type declared by the section, if any.
    pub fn calculator_type(&self) -> Option<&str> {
        self.properties.get(TYPE_KEY)
    }
}

/// `(registered name, implementation id)` pair mined from a registration routine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationEntry {
    pub registered_name: String,
    pub implementation_id: String,
}

/// Settings read by one implementation's `init` routine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultPropertyEntry {
    pub implementation_id: String,
    pub properties: Vec<(String, String)>,
}

/// How a default-value literal captured from a settings accessor is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultLiteral {
    /// Literal exactly as written (quotes kept, `0` is a real default).
    #[default]
    Verbatim,
    /// Like `Verbatim`, but a purely numeric zero is reported as "no default".
    ZeroAsAbsent,
}

impl DefaultLiteral {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "verbatim" => Some(Self::Verbatim),
            "zero-as-absent" | "zero_as_absent" => Some(Self::ZeroAsAbsent),
            _ => None,
        }
    }
}
