// fuzzy/mod.rs
pub mod engine;
pub mod membership;
pub mod rules;
pub mod variable;

pub use engine::{Inference, InferenceEngine};
pub use membership::MembershipFunction;
pub use rules::{Rule, RuleBase};
pub use variable::{LinguisticVariable, Universe};

use thiserror::Error;

/// Misconfiguration caught while building variables or rules. Fatal.
#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("invalid universe [{start}, {end}] with step {step}")]
    InvalidUniverse { start: f64, end: f64, step: f64 },
    #[error("term `{term}` of `{variable}` has malformed control points {points:?}")]
    InvalidShape {
        variable: String,
        term: String,
        points: Vec<f64>,
    },
    #[error("term `{term}` defined twice on `{variable}`")]
    DuplicateTerm { variable: String, term: String },
    #[error("rule references unknown term `{term}` of `{variable}`")]
    UnknownTerm { variable: String, term: String },
    #[error("rule base has no rules")]
    EmptyRuleBase,
    #[error("no rule covers density `{density}` with wait `{wait}`")]
    IncompleteRuleBase { density: String, wait: String },
    #[error("more than one rule covers density `{density}` with wait `{wait}`")]
    ConflictingRules { density: String, wait: String },
}

/// Failure of a single inference call. Recoverable.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("{variable} input is not finite: {value}")]
    NonFiniteInput { variable: &'static str, value: f64 },
    #[error("defuzzified output is not finite")]
    NonFiniteOutput,
}
