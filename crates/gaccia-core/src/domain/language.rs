//! The two competing languages and the five judged dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A competing implementation language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "typescript")]
    TypeScript,
}

impl Language {
    /// Both languages, Python first (the order reports list them in).
    pub const ALL: [Language; 2] = [Language::Python, Language::TypeScript];

    /// The other language in the competition.
    pub fn rival(self) -> Language {
        match self {
            Language::Python => Language::TypeScript,
            Language::TypeScript => Language::Python,
        }
    }

    /// Lowercase tag, also used for markdown code fences.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::TypeScript => "typescript",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::TypeScript => "TypeScript",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::TypeScript => "ts",
        }
    }

    /// Modern toolchain the latest-tools judge looks for.
    pub fn modern_tooling(self) -> &'static str {
        match self {
            Language::Python => "uv, ruff, mypy, pytest",
            Language::TypeScript => "Vite, TypeScript 5.0+, Vitest, ESLint",
        }
    }

    /// Console badge.
    pub fn badge(self) -> &'static str {
        match self {
            Language::Python => "🐍",
            Language::TypeScript => "📘",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a string names neither competing language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0} (expected python or typescript)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "typescript" | "ts" => Ok(Language::TypeScript),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// One fixed axis of code-quality judgment.
///
/// Serialized by its label, which is what reports show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "Readability")]
    Readability,
    #[serde(rename = "Maintainability")]
    Maintainability,
    #[serde(rename = "Latest Tools & Practices")]
    LatestTools,
    #[serde(rename = "Documentation Enjoyability")]
    DocsEnjoyability,
    #[serde(rename = "Security & Performance")]
    SecurityPerformance,
}

impl Dimension {
    /// Canonical evaluation order. Every scorecard follows it.
    pub const CANONICAL: [Dimension; 5] = [
        Dimension::Readability,
        Dimension::Maintainability,
        Dimension::LatestTools,
        Dimension::DocsEnjoyability,
        Dimension::SecurityPerformance,
    ];

    /// Stable snake_case key (progress output, metrics).
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Readability => "readability",
            Dimension::Maintainability => "maintainability",
            Dimension::LatestTools => "latest_tools",
            Dimension::DocsEnjoyability => "docs_enjoyability",
            Dimension::SecurityPerformance => "security_performance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Readability => "Readability",
            Dimension::Maintainability => "Maintainability",
            Dimension::LatestTools => "Latest Tools & Practices",
            Dimension::DocsEnjoyability => "Documentation Enjoyability",
            Dimension::SecurityPerformance => "Security & Performance",
        }
    }

    /// Title used in the judge persona ("Python Latest Tools Judge").
    pub fn judge_title(self) -> &'static str {
        match self {
            Dimension::Readability => "Readability Judge",
            Dimension::Maintainability => "Maintainability Judge",
            Dimension::LatestTools => "Latest Tools Judge",
            Dimension::DocsEnjoyability => "Documentation Enjoyability Judge",
            Dimension::SecurityPerformance => "Security & Performance Judge",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
