//! Annotation records and their namespaces.
//!
//! Declarations produce these immutable value objects exactly once; the
//! metadata store owns them for the rest of the process lifetime.

use serde_json::Value;

/// The independent annotation namespaces the metadata store keys by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Class-level suite declarations.
    Suite,
    /// Method-level test declarations.
    Test,
    /// Method-level, repeatable test data declarations.
    TestData,
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Suite => "suite",
            Self::Test => "test",
            Self::TestData => "test data",
        })
    }
}

/// Declares one target type as a named, skippable suite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteAnnotation {
    name: String,
    skip: bool,
}

impl SuiteAnnotation {
    /// Creates a suite annotation.
    #[must_use]
    pub fn new(name: impl Into<String>, skip: bool) -> Self {
        Self {
            name: name.into(),
            skip,
        }
    }

    /// Returns the suite display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the whole suite is skipped.
    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip
    }
}

/// Declares one member of a target type as a test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestAnnotation {
    name: String,
    method: &'static str,
    skip: bool,
}

impl TestAnnotation {
    /// Creates a test annotation for the named member.
    #[must_use]
    pub fn new(name: impl Into<String>, method: &'static str, skip: bool) -> Self {
        Self {
            name: name.into(),
            method,
            skip,
        }
    }

    /// Returns the test display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member this annotation targets.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        self.method
    }

    /// Returns whether the test is skipped.
    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip
    }
}

/// Declares one data set for a (target, method) pair.
///
/// A single annotation may carry several argument tuples; expansion
/// flat-maps every annotation's tuples into the final spec list. The
/// optional `name` overrides the generated display name of every spec this
/// annotation contributes; `test_name` is an informational label carried
/// through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct TestDataAnnotation {
    sets: Vec<Vec<Value>>,
    name: Option<String>,
    test_name: Option<String>,
}

impl TestDataAnnotation {
    /// Creates a data annotation from one or more argument tuples.
    #[must_use]
    pub fn new(sets: Vec<Vec<Value>>) -> Self {
        Self {
            sets,
            name: None,
            test_name: None,
        }
    }

    /// Sets the display-name override for the contributed specs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the informational label.
    #[must_use]
    pub fn with_test_name(mut self, test_name: impl Into<String>) -> Self {
        self.test_name = Some(test_name.into());
        self
    }

    /// Returns the argument tuples in declaration order.
    #[must_use]
    pub fn sets(&self) -> &[Vec<Value>] {
        &self.sets
    }

    /// Returns the display-name override, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the informational label, if any.
    #[must_use]
    pub fn test_name(&self) -> Option<&str> {
        self.test_name.as_deref()
    }
}

/// A record stored in the metadata store under one annotation namespace.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationRecord {
    /// A suite declaration.
    Suite(SuiteAnnotation),
    /// A test declaration.
    Test(TestAnnotation),
    /// A test data declaration.
    TestData(TestDataAnnotation),
}

impl AnnotationRecord {
    /// Returns the namespace this record belongs to.
    #[must_use]
    pub const fn kind(&self) -> AnnotationKind {
        match self {
            Self::Suite(_) => AnnotationKind::Suite,
            Self::Test(_) => AnnotationKind::Test,
            Self::TestData(_) => AnnotationKind::TestData,
        }
    }

    /// Returns the suite annotation when this record holds one.
    #[must_use]
    pub const fn as_suite(&self) -> Option<&SuiteAnnotation> {
        match self {
            Self::Suite(annotation) => Some(annotation),
            _ => None,
        }
    }

    /// Returns the test annotation when this record holds one.
    #[must_use]
    pub const fn as_test(&self) -> Option<&TestAnnotation> {
        match self {
            Self::Test(annotation) => Some(annotation),
            _ => None,
        }
    }

    /// Returns the test data annotation when this record holds one.
    #[must_use]
    pub const fn as_test_data(&self) -> Option<&TestDataAnnotation> {
        match self {
            Self::TestData(annotation) => Some(annotation),
            _ => None,
        }
    }
}
