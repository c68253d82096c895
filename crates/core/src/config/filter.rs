use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Method, MethodCoupling};

/// Error raised when a filter configuration cannot be compiled.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid {field} pattern '{pattern}': {source}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Criteria for one end (source or target) of a coupling.
///
/// Every criterion that is set must match for the filter to match; an empty
/// filter specifies nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFilter {
    /// Package prefixes, matched on package boundaries (`com.acme` matches
    /// `com.acme` and `com.acme.util`, not `com.acmeco`). A trailing `.*` is
    /// accepted and ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,
    /// Plain prefixes of the fully-qualified class name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Regular expression over the fully-qualified class name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_pattern: Option<String>,
    /// Regular expression over the method name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_pattern: Option<String>,
}

impl MethodFilter {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.classes.is_empty()
            && self.class_pattern.is_none()
            && self.method_pattern.is_none()
    }

    /// Builder-style helper for the common "package prefix" case.
    pub fn for_packages<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { packages: packages.into_iter().map(Into::into).collect(), ..Self::default() }
    }
}

/// Independent source/target criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingFilter {
    #[serde(default)]
    pub source: MethodFilter,
    #[serde(default)]
    pub target: MethodFilter,
}

/// Inclusion/exclusion rules applied to every coupling at insertion time.
///
/// The default configuration accepts every coupling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingFilterConfig {
    #[serde(default)]
    pub include: CouplingFilter,
    #[serde(default)]
    pub exclude: CouplingFilter,
}

impl CouplingFilterConfig {
    /// Reject every coupling whose target lives under one of `packages`.
    pub fn exclude_target_packages<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: CouplingFilter::default(),
            exclude: CouplingFilter {
                source: MethodFilter::default(),
                target: MethodFilter::for_packages(packages),
            },
        }
    }
}

/// Compiled form of a `MethodFilter`.
#[derive(Debug, Clone, Default)]
struct MethodMatcher {
    packages: Vec<String>,
    classes: Vec<String>,
    class_pattern: Option<Regex>,
    method_pattern: Option<Regex>,
}

impl MethodMatcher {
    fn compile(filter: &MethodFilter) -> Result<Self, FilterError> {
        let packages = filter
            .packages
            .iter()
            .map(|p| p.trim_end_matches(".*").trim_end_matches('.').to_string())
            .collect();
        Ok(Self {
            packages,
            classes: filter.classes.clone(),
            class_pattern: compile_pattern("class_pattern", filter.class_pattern.as_deref())?,
            method_pattern: compile_pattern("method_pattern", filter.method_pattern.as_deref())?,
        })
    }

    fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.classes.is_empty()
            && self.class_pattern.is_none()
            && self.method_pattern.is_none()
    }

    fn matches(&self, method: &Method) -> bool {
        if !self.packages.is_empty() {
            let package = method.package_name();
            if !self.packages.iter().any(|prefix| package_has_prefix(package, prefix)) {
                return false;
            }
        }
        if !self.classes.is_empty()
            && !self.classes.iter().any(|prefix| method.class_name.starts_with(prefix.as_str()))
        {
            return false;
        }
        if let Some(re) = &self.class_pattern {
            if !re.is_match(&method.class_name) {
                return false;
            }
        }
        if let Some(re) = &self.method_pattern {
            if !re.is_match(&method.method_name) {
                return false;
            }
        }
        true
    }
}

fn compile_pattern(
    field: &'static str,
    pattern: Option<&str>,
) -> Result<Option<Regex>, FilterError> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|source| FilterError::InvalidPattern {
                field,
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()
}

fn package_has_prefix(package: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match package.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// One end's include/exclude pair.
#[derive(Debug, Clone, Default)]
struct EndpointRule {
    include: MethodMatcher,
    exclude: MethodMatcher,
}

impl EndpointRule {
    fn accepts(&self, method: &Method) -> bool {
        let included = self.include.is_empty() || self.include.matches(method);
        let excluded = !self.exclude.is_empty() && self.exclude.matches(method);
        included && !excluded
    }
}

/// Compiled `CouplingFilterConfig`, ready to evaluate couplings.
///
/// Invalid patterns are rejected by `compile`, so evaluation never fails.
#[derive(Debug, Clone, Default)]
pub struct CouplingPredicate {
    source: EndpointRule,
    target: EndpointRule,
}

impl CouplingPredicate {
    pub fn compile(config: &CouplingFilterConfig) -> Result<Self, FilterError> {
        Ok(Self {
            source: EndpointRule {
                include: MethodMatcher::compile(&config.include.source)?,
                exclude: MethodMatcher::compile(&config.exclude.source)?,
            },
            target: EndpointRule {
                include: MethodMatcher::compile(&config.include.target)?,
                exclude: MethodMatcher::compile(&config.exclude.target)?,
            },
        })
    }

    pub fn accepts_source(&self, method: &Method) -> bool {
        self.source.accepts(method)
    }

    pub fn accepts_target(&self, method: &Method) -> bool {
        self.target.accepts(method)
    }

    /// Both ends are evaluated independently; rejecting either drops the edge.
    pub fn accepts(&self, coupling: &MethodCoupling) -> bool {
        self.accepts_source(&coupling.source) && self.accepts_target(&coupling.target)
    }
}

/// Prefix-based selection of class names during enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNameFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_prefixes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_prefixes: Vec<String>,
}

impl ClassNameFilter {
    pub fn matches(&self, class_name: &str) -> bool {
        let included = self.include_prefixes.is_empty()
            || self.include_prefixes.iter().any(|p| class_name.starts_with(p.as_str()));
        let excluded = self.exclude_prefixes.iter().any(|p| class_name.starts_with(p.as_str()));
        included && !excluded
    }
}
