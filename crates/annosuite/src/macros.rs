//! Declaration macros exported by `annosuite`.
//!
//! The macros live in a dedicated module to keep `lib.rs` small; they remain
//! available at the crate root via `#[macro_export]`. Each hides an
//! `inventory` submission and captures the source location automatically, so
//! ingestion can keep declarations in source order.

/// Declares a type as a test suite.
///
/// Forms: `suite!(Type)` (name defaults to the type name),
/// `suite!(Type, "name")`, and `suite!(Type, "name", skip)`.
///
/// # Examples
///
/// ```
/// use annosuite::suite;
///
/// struct CalculatorTests;
///
/// suite!(CalculatorTests, "calculator");
/// ```
#[macro_export]
macro_rules! suite {
    ($target:ident) => {
        $crate::suite!(@submit $target, stringify!($target), false);
    };
    ($target:ident, $name:expr) => {
        $crate::suite!(@submit $target, $name, false);
    };
    ($target:ident, $name:expr, skip) => {
        $crate::suite!(@submit $target, $name, true);
    };
    (@submit $target:ident, $name:expr, $skip:expr) => {
        $crate::submit! {
            $crate::declare::SuiteDecl {
                target: $crate::target_ref!($target),
                name: $name,
                skip: $skip,
                file: file!(),
                line: line!(),
            }
        }
    };
}

/// Declares a member of a suite type as a test.
///
/// Forms: `test_case!(Type::method)` (name defaults to the method name),
/// `test_case!(Type::method, "name")`, and
/// `test_case!(Type::method, "name", skip)`.
///
/// # Examples
///
/// ```
/// use annosuite::test_case;
///
/// struct CalculatorTests;
///
/// test_case!(CalculatorTests::adds, "adds two numbers");
/// ```
#[macro_export]
macro_rules! test_case {
    ($target:ident :: $method:ident) => {
        $crate::test_case!(@submit $target, $method, stringify!($method), false);
    };
    ($target:ident :: $method:ident, $name:expr) => {
        $crate::test_case!(@submit $target, $method, $name, false);
    };
    ($target:ident :: $method:ident, $name:expr, skip) => {
        $crate::test_case!(@submit $target, $method, $name, true);
    };
    (@submit $target:ident, $method:ident, $name:expr, $skip:expr) => {
        $crate::submit! {
            $crate::declare::TestDecl {
                target: $crate::target_ref!($target),
                method: stringify!($method),
                name: $name,
                skip: $skip,
                file: file!(),
                line: line!(),
            }
        }
    };
}

/// Declares one data set for a test member.
///
/// The macro is repeatable; each use contributes its tuples in source order.
/// A single use may carry one tuple (`[args...]`) or several
/// (`sets = [[..], [..]]`). `name = "..."` overrides the display name of
/// every spec this data set contributes, and `test_name = "..."` attaches an
/// informational label.
///
/// # Examples
///
/// ```
/// use annosuite::test_data;
///
/// struct CalculatorTests;
///
/// test_data!(CalculatorTests::adds, [1, 2, 3]);
/// test_data!(CalculatorTests::adds, name = "100 plus 200 should return 300", [100, 200, 300]);
/// test_data!(CalculatorTests::clamps, sets = [[5, 5], [-1, 0]]);
/// ```
#[macro_export]
macro_rules! test_data {
    ($target:ident :: $method:ident, [$($arg:expr),* $(,)?]) => {
        $crate::test_data!(@submit $target, $method,
            ::core::option::Option::None,
            ::core::option::Option::None,
            || ::std::vec![::std::vec![$($crate::json!($arg)),*]]);
    };
    ($target:ident :: $method:ident, name = $name:expr, [$($arg:expr),* $(,)?]) => {
        $crate::test_data!(@submit $target, $method,
            ::core::option::Option::Some($name),
            ::core::option::Option::None,
            || ::std::vec![::std::vec![$($crate::json!($arg)),*]]);
    };
    ($target:ident :: $method:ident, test_name = $label:expr, [$($arg:expr),* $(,)?]) => {
        $crate::test_data!(@submit $target, $method,
            ::core::option::Option::None,
            ::core::option::Option::Some($label),
            || ::std::vec![::std::vec![$($crate::json!($arg)),*]]);
    };
    ($target:ident :: $method:ident, name = $name:expr, test_name = $label:expr,
        [$($arg:expr),* $(,)?]) => {
        $crate::test_data!(@submit $target, $method,
            ::core::option::Option::Some($name),
            ::core::option::Option::Some($label),
            || ::std::vec![::std::vec![$($crate::json!($arg)),*]]);
    };
    ($target:ident :: $method:ident, sets = [$([$($arg:expr),* $(,)?]),+ $(,)?]) => {
        $crate::test_data!(@submit $target, $method,
            ::core::option::Option::None,
            ::core::option::Option::None,
            || ::std::vec![$(::std::vec![$($crate::json!($arg)),*]),+]);
    };
    ($target:ident :: $method:ident, name = $name:expr,
        sets = [$([$($arg:expr),* $(,)?]),+ $(,)?]) => {
        $crate::test_data!(@submit $target, $method,
            ::core::option::Option::Some($name),
            ::core::option::Option::None,
            || ::std::vec![$(::std::vec![$($crate::json!($arg)),*]),+]);
    };
    (@submit $target:ident, $method:ident, $name:expr, $label:expr, $sets:expr) => {
        $crate::submit! {
            $crate::declare::DataDecl {
                target: $crate::target_ref!($target),
                method: stringify!($method),
                sets: $sets,
                name: $name,
                test_name: $label,
                file: file!(),
                line: line!(),
            }
        }
    };
}
