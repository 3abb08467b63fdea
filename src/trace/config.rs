//! Trace configuration.
//!
//! [`TraceConfig`] carries the depth budget and the two class classifiers
//! the engine consults: endpoint-style classes (whose branches get a fresh
//! depth budget) and service-style classes (labelled in interface fan-out).

use thiserror::Error;

/// Default depth budget.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Largest accepted depth budget.
pub const MAX_DEPTH_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max depth must be between 1 and {max}, got {value}")]
    DepthOutOfRange { value: usize, max: usize },
}

/// Recognizes a class by name suffix or annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(default))]
pub struct ClassPattern {
    pub name_suffixes: Vec<String>,
    /// Simple annotation names, without `@`.
    pub annotations: Vec<String>,
}

impl ClassPattern {
    pub fn new<S, A>(name_suffixes: S, annotations: A) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            name_suffixes: name_suffixes.into_iter().map(Into::into).collect(),
            annotations: annotations.into_iter().map(Into::into).collect(),
        }
    }

    /// Request-handling classes.
    pub fn endpoint() -> Self {
        Self::new(
            ["Controller", "Resource", "RestController", "Api"],
            [
                "Controller",
                "RestController",
                "RequestMapping",
                "GetMapping",
                "PostMapping",
                "PutMapping",
                "DeleteMapping",
                "PatchMapping",
                "Path",
            ],
        )
    }

    /// Service, repository and data-access classes.
    pub fn service() -> Self {
        Self::new(
            ["Service", "ServiceImpl", "Repository", "Dao", "DAO", "Manager"],
            ["Service", "Repository", "Component"],
        )
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffixes.push(suffix.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn matches<N: AsRef<str>>(&self, class_name: &str, annotations: &[N]) -> bool {
        self.name_suffixes
            .iter()
            .any(|suffix| class_name.ends_with(suffix.as_str()))
            || annotations.iter().any(|annotation| {
                self.annotations
                    .iter()
                    .any(|known| known.as_str() == annotation.as_ref())
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(default))]
pub struct TraceConfig {
    pub max_depth: usize,
    pub endpoint: ClassPattern,
    pub service: ClassPattern,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            endpoint: ClassPattern::endpoint(),
            service: ClassPattern::service(),
        }
    }
}

impl TraceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_endpoint(mut self, endpoint: ClassPattern) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_service(mut self, service: ClassPattern) -> Self {
        self.service = service;
        self
    }

    /// Check the caller-facing bounds. The engine runs with whatever it is given.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthOutOfRange {
                value: self.max_depth,
                max: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}
