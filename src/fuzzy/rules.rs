// fuzzy/rules.rs

use crate::fuzzy::variable::LinguisticVariable;
use crate::fuzzy::FuzzyError;

/// `IF density IS <density> AND wait IS <wait> THEN green IS <green>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub density: String,
    pub wait: String,
    pub green: String,
}

impl Rule {
    pub fn new(density: &str, wait: &str, green: &str) -> Self {
        Self {
            density: density.to_string(),
            wait: wait.to_string(),
            green: green.to_string(),
        }
    }
}

/// A rule with its term names resolved to indices into the variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledRule {
    pub density: usize,
    pub wait: usize,
    pub green: usize,
}

/// Immutable set of rules, checked against the variables once at construction.
#[derive(Debug, Clone)]
pub struct RuleBase {
    rules: Vec<Rule>,
    compiled: Vec<CompiledRule>,
}

impl RuleBase {
    pub fn new(
        rules: Vec<Rule>,
        density: &LinguisticVariable,
        wait: &LinguisticVariable,
        green: &LinguisticVariable,
    ) -> Result<Self, FuzzyError> {
        if rules.is_empty() {
            return Err(FuzzyError::EmptyRuleBase);
        }
        let compiled = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    density: resolve(density, &rule.density)?,
                    wait: resolve(wait, &rule.wait)?,
                    green: resolve(green, &rule.green)?,
                })
            })
            .collect::<Result<Vec<_>, FuzzyError>>()?;
        check_coverage(&compiled, density, wait)?;
        Ok(Self { rules, compiled })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn compiled(&self) -> &[CompiledRule] {
        &self.compiled
    }
}

// Every (density, wait) pair must be the antecedent of exactly one rule.
fn check_coverage(
    compiled: &[CompiledRule],
    density: &LinguisticVariable,
    wait: &LinguisticVariable,
) -> Result<(), FuzzyError> {
    let term = |variable: &LinguisticVariable, index: usize| {
        variable.term_name(index).unwrap_or_default().to_string()
    };
    for d in 0..density.term_count() {
        for w in 0..wait.term_count() {
            let covering = compiled
                .iter()
                .filter(|rule| rule.density == d && rule.wait == w)
                .count();
            match covering {
                1 => {}
                0 => {
                    return Err(FuzzyError::IncompleteRuleBase {
                        density: term(density, d),
                        wait: term(wait, w),
                    })
                }
                _ => {
                    return Err(FuzzyError::ConflictingRules {
                        density: term(density, d),
                        wait: term(wait, w),
                    })
                }
            }
        }
    }
    Ok(())
}

fn resolve(variable: &LinguisticVariable, term: &str) -> Result<usize, FuzzyError> {
    variable
        .term_index(term)
        .ok_or_else(|| FuzzyError::UnknownTerm {
            variable: variable.name().to_string(),
            term: term.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::membership::MembershipFunction;
    use crate::fuzzy::variable::Universe;

    fn variable(name: &str, terms: &[&str]) -> LinguisticVariable {
        let mut var = LinguisticVariable::new(name, Universe::new(0.0, 10.0, 1.0).unwrap());
        for term in terms {
            var.add_term(*term, MembershipFunction::triangle(0.0, 5.0, 10.0))
                .unwrap();
        }
        var
    }

    #[test]
    fn resolves_term_indices() {
        let density = variable("density", &["low", "high"]);
        let wait = variable("wait", &["short", "long"]);
        let green = variable("green", &["short", "long"]);
        let base = RuleBase::new(
            vec![
                Rule::new("high", "short", "long"),
                Rule::new("high", "long", "long"),
                Rule::new("low", "short", "short"),
                Rule::new("low", "long", "short"),
            ],
            &density,
            &wait,
            &green,
        )
        .unwrap();
        assert_eq!(base.len(), 4);
        assert_eq!(
            base.compiled()[0],
            CompiledRule {
                density: 1,
                wait: 0,
                green: 1
            }
        );
    }

    #[test]
    fn unknown_term_fails_construction() {
        let density = variable("density", &["low"]);
        let wait = variable("wait", &["short"]);
        let green = variable("green", &["short"]);
        let err = RuleBase::new(
            vec![Rule::new("low", "medium", "short")],
            &density,
            &wait,
            &green,
        )
        .unwrap_err();
        match err {
            FuzzyError::UnknownTerm { variable, term } => {
                assert_eq!(variable, "wait");
                assert_eq!(term, "medium");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_rule_base_is_rejected() {
        let var = variable("x", &["a"]);
        assert!(matches!(
            RuleBase::new(Vec::new(), &var, &var, &var),
            Err(FuzzyError::EmptyRuleBase)
        ));
    }

    #[test]
    fn missing_combination_fails_construction() {
        let density = variable("density", &["low", "high"]);
        let wait = variable("wait", &["short", "long"]);
        let green = variable("green", &["short"]);
        let err = RuleBase::new(
            vec![
                Rule::new("low", "short", "short"),
                Rule::new("low", "long", "short"),
                Rule::new("high", "short", "short"),
            ],
            &density,
            &wait,
            &green,
        )
        .unwrap_err();
        match err {
            FuzzyError::IncompleteRuleBase { density, wait } => {
                assert_eq!(density, "high");
                assert_eq!(wait, "long");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn repeated_antecedent_fails_construction() {
        let density = variable("density", &["low"]);
        let wait = variable("wait", &["short"]);
        let green = variable("green", &["short", "long"]);
        let err = RuleBase::new(
            vec![
                Rule::new("low", "short", "short"),
                Rule::new("low", "short", "long"),
            ],
            &density,
            &wait,
            &green,
        )
        .unwrap_err();
        assert!(matches!(err, FuzzyError::ConflictingRules { .. }));
    }
}
