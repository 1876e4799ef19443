//! Named validation rules and rule sets.

use expr_engine::{Context, Engine, EngineOptions, Value};
use log::debug;
use serde::{Deserialize, Serialize};

/// A boolean expression that a set of answers must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub name: String,
    /// Shown to the user when the rule fails.
    pub message: String,
    pub expression: String,
}

impl ValidationRule {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        ValidationRule {
            name: name.into(),
            message: message.into(),
            expression: expression.into(),
        }
    }

    /// True only when the expression evaluates to the boolean `true`.
    ///
    /// Syntax errors, evaluation errors and non-boolean results all count as
    /// a failed rule and are never propagated.
    pub fn passes(&self, context: &Context) -> bool {
        self.passes_with(&Engine::default(), context)
    }

    pub fn passes_with(&self, engine: &Engine, context: &Context) -> bool {
        match engine.exec(&self.expression, context) {
            Ok(Value::Bool(true)) => true,
            Ok(other) => {
                debug!(
                    "rule {:?} did not pass: expression produced {}",
                    self.name, other
                );
                false
            }
            Err(e) => {
                debug!("rule {:?} did not pass: {}", self.name, e);
                false
            }
        }
    }
}

/// A failed rule, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<RuleViolation>,
}

/// An ordered collection of rules checked together, with the engine
/// options used to run them.
///
/// Loads from configuration:
///
/// ```toml
/// [options]
/// max_depth = 64
///
/// [[rules]]
/// name = "adult"
/// message = "Must be at least 18"
/// expression = "age >= 18"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub options: EngineOptions,
    #[serde(default)]
    pub rules: Vec<ValidationRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ValidationRule>) -> Self {
        RuleSet {
            options: EngineOptions::default(),
            rules,
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs every rule; the report lists the failures in rule order.
    pub fn validate(&self, context: &Context) -> ValidationReport {
        let engine = Engine::new(self.options);
        let violations: Vec<RuleViolation> = self
            .rules
            .iter()
            .filter(|rule| !rule.passes_with(&engine, context))
            .map(|rule| RuleViolation {
                rule: rule.name.clone(),
                message: rule.message.clone(),
            })
            .collect();
        ValidationReport {
            valid: violations.is_empty(),
            violations,
        }
    }
}
