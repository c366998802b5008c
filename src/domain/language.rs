/// Language Domain Module
///
/// Source languages a translation unit can be parsed as.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Languages the frontend reports for a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "c")]
    C,
    #[serde(rename = "objective-c")]
    ObjectiveC,
    #[serde(rename = "c++")]
    CPlusPlus,
}

impl Language {
    /// Parse language from string (CLI or dump input).
    pub fn from_str(s: &str) -> Option<Language> {
        match s.to_lowercase().as_str() {
            "c" => Some(Language::C),
            "objective-c" | "objc" | "objective-c++" => Some(Language::ObjectiveC),
            "c++" | "cpp" | "cxx" => Some(Language::CPlusPlus),
            _ => None,
        }
    }

    /// Infer language from file extension.
    pub fn from_extension(ext: &str) -> Option<Language> {
        match ext.to_lowercase().as_str() {
            "c" | "h" | "i" => Some(Language::C),
            "m" | "mm" => Some(Language::ObjectiveC),
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "ii" => Some(Language::CPlusPlus),
            _ => None,
        }
    }

    /// Infer language from a file path.
    pub fn from_path(path: &Path) -> Option<Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Identifier written into the unit metadata.
    pub fn name(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::ObjectiveC => "objective-c",
            Language::CPlusPlus => "c++",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
