//! Validation rules on top of [`expr_engine`].
//!
//! Rules are authored as expression strings by people who are not
//! programmers, so nothing here ever propagates an engine error: a rule that
//! cannot be parsed or evaluated simply does not pass.
//!
//! ```
//! use expr_engine::Context;
//! use expr_rules::{RuleSet, ValidationRule};
//!
//! let rules = RuleSet::new(vec![
//!     ValidationRule::new(
//!         "age-range",
//!         "Age must be between 18 and 100",
//!         "age >= 18 && age <= 100",
//!     ),
//! ]);
//!
//! assert!(rules.validate(&Context::new().with("age", 25)).valid);
//! let report = rules.validate(&Context::new().with("age", 150));
//! assert_eq!(report.violations[0].rule, "age-range");
//! ```

pub mod error;
pub mod expressions;
pub mod rule;

pub use error::RuleError;
pub use expressions::{check_syntax, evaluate_all, is_visible, ExpressionResult};
pub use rule::{RuleSet, RuleViolation, ValidationReport, ValidationRule};
