//! Payload types carried by lifecycle events
//!
//! Payloads are handed to the dispatcher wrapped in `Arc` and are never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata describing a specification (a test class)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecInfo {
    pub name: String,
    pub package: Option<String>,
    pub filename: Option<String>,
    pub line: Option<u32>,
}

impl SpecInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            filename: None,
            line: None,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_location(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.filename = Some(filename.into());
        self.line = Some(line);
        self
    }

    /// Package-qualified name, or the bare name when no package is known
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) if !package.is_empty() => format!("{}.{}", package, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Metadata describing a feature (a test method) within a specification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub name: String,
    pub spec_name: String,
    pub line: Option<u32>,
    pub parameterized: bool,
}

impl FeatureInfo {
    pub fn new(spec_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec_name: spec_name.into(),
            line: None,
            parameterized: false,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn parameterized(mut self) -> Self {
        self.parameterized = true;
        self
    }
}

/// Metadata describing one iteration of a feature
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationInfo {
    pub name: String,
    pub feature_name: String,
    pub index: usize,
    pub data_values: Vec<String>,
}

impl IterationInfo {
    pub fn new(feature_name: impl Into<String>, name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            feature_name: feature_name.into(),
            index,
            data_values: Vec::new(),
        }
    }

    pub fn with_data_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Which part of a run raised an error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorSource {
    Spec,
    Feature,
    Iteration,
    Fixture,
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorSource::Spec => "spec",
            ErrorSource::Feature => "feature",
            ErrorSource::Iteration => "iteration",
            ErrorSource::Fixture => "fixture",
        };
        f.write_str(label)
    }
}

/// An error raised while running a specification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub source_kind: ErrorSource,
    pub source_name: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(
        source_kind: ErrorSource,
        source_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source_kind,
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
