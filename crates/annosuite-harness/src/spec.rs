//! Spec descriptors and the deferred factory that produces them.

use serde_json::Value;

/// Opaque identity of an annotated target type.
///
/// Declaration glue produces one of these per annotated type via the
/// [`target_ref!`](crate::target_ref) macro; the core and adapters treat it as
/// a pure identifier and never instantiate the type behind it. Equality and
/// hashing consider only the fully qualified `id`; `display` is the short
/// name used when rendering suite trees and error messages.
///
/// # Examples
///
/// ```
/// use annosuite_harness::TargetRef;
///
/// let target = TargetRef::new("my_crate::login::LoginTests", "LoginTests");
/// assert_eq!(target.display(), "LoginTests");
/// assert_eq!(target.id(), "my_crate::login::LoginTests");
/// ```
#[derive(Clone, Copy, Debug, Eq)]
pub struct TargetRef {
    id: &'static str,
    display: &'static str,
}

impl TargetRef {
    /// Creates a target reference from a fully qualified id and a short
    /// display name.
    #[must_use]
    pub const fn new(id: &'static str, display: &'static str) -> Self {
        Self { id, display }
    }

    /// Returns the fully qualified identifier used as the metadata key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        self.id
    }

    /// Returns the short name used in generated suite output.
    #[must_use]
    pub const fn display(self) -> &'static str {
        self.display
    }
}

impl PartialEq for TargetRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for TargetRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display)
    }
}

/// Builds a [`TargetRef`] for a type declared in the current module.
///
/// The id combines [`module_path!`] with the type name, which keeps metadata
/// keys unique across modules while the display name stays short.
///
/// # Examples
///
/// ```
/// use annosuite_harness::target_ref;
///
/// struct CalculatorTests;
///
/// let target = target_ref!(CalculatorTests);
/// assert_eq!(target.display(), "CalculatorTests");
/// assert!(target.id().ends_with("::CalculatorTests"));
/// ```
#[macro_export]
macro_rules! target_ref {
    ($target:ident) => {
        $crate::TargetRef::new(
            concat!(module_path!(), "::", stringify!($target)),
            stringify!($target),
        )
    };
}

/// One concrete, not-yet-executed test invocation.
///
/// A spec binds a target type, a method name, and one argument tuple.
/// It carries no behaviour of its own: instantiating the target, invoking
/// the method, and interpreting the outcome are the execution engine's
/// responsibility.
///
/// Equality is structural over all three fields.
///
/// # Examples
///
/// ```
/// use annosuite_harness::{Spec, TargetRef};
/// use serde_json::json;
///
/// let target = TargetRef::new("demo::AdderTests", "AdderTests");
/// let spec = Spec::new(target, "adds", vec![json!(1), json!(2), json!(3)]);
/// assert_eq!(spec.method(), "adds");
/// assert_eq!(spec.data(), [json!(1), json!(2), json!(3)]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Spec {
    target: TargetRef,
    method: String,
    data: Vec<Value>,
}

impl Spec {
    /// Creates a spec descriptor for one invocation of `target::method`.
    #[must_use]
    pub fn new(target: TargetRef, method: impl Into<String>, data: Vec<Value>) -> Self {
        Self {
            target,
            method: method.into(),
            data,
        }
    }

    /// Returns the annotated target type this spec runs against.
    #[must_use]
    pub const fn target(&self) -> TargetRef {
        self.target
    }

    /// Returns the member name to invoke on the target.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the argument tuple for this invocation.
    #[must_use]
    pub fn data(&self) -> &[Value] {
        &self.data
    }
}

/// Deferred zero-argument factory producing a [`Spec`].
///
/// The registration core hands one of these to the adapter for every spec it
/// expands; the adapter stores it and calls [`produce`](Self::produce) only
/// at the moment the engine actually runs the test. Constructing the factory
/// never constructs the spec, so any side effects of reading metadata are
/// deferred past registration time.
///
/// # Examples
///
/// ```
/// use annosuite_harness::{Spec, SpecFactory, TargetRef};
///
/// let target = TargetRef::new("demo::AdderTests", "AdderTests");
/// let factory = SpecFactory::new(move || Spec::new(target, "adds", vec![]));
/// let spec = factory.produce();
/// assert_eq!(spec.method(), "adds");
/// ```
pub struct SpecFactory {
    inner: Box<dyn FnOnce() -> Spec + Send>,
}

impl SpecFactory {
    /// Wraps a closure as a deferred spec factory.
    #[must_use]
    pub fn new(inner: impl FnOnce() -> Spec + Send + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Invokes the factory, consuming it and yielding the spec.
    #[must_use]
    pub fn produce(self) -> Spec {
        (self.inner)()
    }
}

impl std::fmt::Debug for SpecFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SpecFactory(..)")
    }
}
