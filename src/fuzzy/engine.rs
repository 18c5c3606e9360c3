// fuzzy/engine.rs

use crate::fuzzy::membership::MembershipFunction;
use crate::fuzzy::rules::{Rule, RuleBase};
use crate::fuzzy::variable::{LinguisticVariable, Universe};
use crate::fuzzy::{FuzzyError, InferenceError};

/// Everything computed along the way from crisp inputs to crisp output.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub density: f64,
    pub wait: f64,
    /// Degree of each density term, in term order.
    pub density_degrees: Vec<f64>,
    /// Degree of each wait term, in term order.
    pub wait_degrees: Vec<f64>,
    /// Firing strength of each rule, in rule order.
    pub rule_strengths: Vec<f64>,
    /// Height each green term is clipped at.
    pub clip_levels: Vec<f64>,
    /// Aggregated output membership over the green universe.
    pub aggregated: Vec<f64>,
    /// False when no rule fired and the output fell back to the universe midpoint.
    pub fired: bool,
    pub green: f64,
}

/// Mamdani-style min/max inference with centroid defuzzification.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    density: LinguisticVariable,
    wait: LinguisticVariable,
    green: LinguisticVariable,
    rules: RuleBase,
    // Each green term sampled over the green universe, computed once.
    green_curves: Vec<Vec<f64>>,
}

impl InferenceEngine {
    pub fn new(
        density: LinguisticVariable,
        wait: LinguisticVariable,
        green: LinguisticVariable,
        rules: Vec<Rule>,
    ) -> Result<Self, FuzzyError> {
        let rules = RuleBase::new(rules, &density, &wait, &green)?;
        let green_curves = (0..green.term_count()).map(|i| green.sample(i)).collect();
        Ok(Self {
            density,
            wait,
            green,
            rules,
            green_curves,
        })
    }

    /// The traffic controller's variables and its full 3x3 rule table.
    pub fn traffic() -> Result<Self, FuzzyError> {
        let density = LinguisticVariable::new("density", Universe::new(0.0, 100.0, 1.0)?)
            .with_term("low", MembershipFunction::trapezoid(0.0, 0.0, 25.0, 45.0))?
            .with_term("medium", MembershipFunction::triangle(25.0, 50.0, 75.0))?
            .with_term("high", MembershipFunction::trapezoid(55.0, 75.0, 100.0, 100.0))?;

        let wait = LinguisticVariable::new("wait", Universe::new(0.0, 120.0, 1.0)?)
            .with_term("short", MembershipFunction::trapezoid(0.0, 0.0, 30.0, 50.0))?
            .with_term("medium", MembershipFunction::triangle(30.0, 60.0, 90.0))?
            .with_term("long", MembershipFunction::trapezoid(70.0, 90.0, 120.0, 120.0))?;

        let green = LinguisticVariable::new("green", Universe::new(5.0, 90.0, 1.0)?)
            .with_term("short", MembershipFunction::trapezoid(5.0, 5.0, 20.0, 35.0))?
            .with_term("medium", MembershipFunction::triangle(20.0, 40.0, 60.0))?
            .with_term("long", MembershipFunction::trapezoid(45.0, 60.0, 90.0, 90.0))?;

        let rules = vec![
            Rule::new("low", "short", "short"),
            Rule::new("low", "medium", "medium"),
            Rule::new("low", "long", "medium"),
            Rule::new("medium", "short", "medium"),
            Rule::new("medium", "medium", "medium"),
            Rule::new("medium", "long", "long"),
            Rule::new("high", "short", "long"),
            Rule::new("high", "medium", "long"),
            Rule::new("high", "long", "long"),
        ];

        Self::new(density, wait, green, rules)
    }

    pub fn density(&self) -> &LinguisticVariable {
        &self.density
    }

    pub fn wait(&self) -> &LinguisticVariable {
        &self.wait
    }

    pub fn green(&self) -> &LinguisticVariable {
        &self.green
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Crisp green duration for crisp density and wait.
    pub fn infer(&self, density: f64, wait: f64) -> Result<f64, InferenceError> {
        self.infer_detailed(density, wait).map(|inference| inference.green)
    }

    pub fn infer_detailed(&self, density: f64, wait: f64) -> Result<Inference, InferenceError> {
        if !density.is_finite() {
            return Err(InferenceError::NonFiniteInput {
                variable: "density",
                value: density,
            });
        }
        if !wait.is_finite() {
            return Err(InferenceError::NonFiniteInput {
                variable: "wait",
                value: wait,
            });
        }

        let density_degrees = self.density.fuzzify(density);
        let wait_degrees = self.wait.fuzzify(wait);

        let mut clip_levels = vec![0.0_f64; self.green.term_count()];
        let rule_strengths: Vec<f64> = self
            .rules
            .compiled()
            .iter()
            .map(|rule| {
                let strength = density_degrees[rule.density].min(wait_degrees[rule.wait]);
                // Rules sharing a consequent combine by maximum.
                clip_levels[rule.green] = clip_levels[rule.green].max(strength);
                strength
            })
            .collect();

        let points = self.green.universe().points();
        let aggregated: Vec<f64> = (0..points.len())
            .map(|i| {
                self.green_curves
                    .iter()
                    .zip(&clip_levels)
                    .map(|(curve, &level)| curve[i].min(level))
                    .fold(0.0, f64::max)
            })
            .collect();

        let (weighted, total) = points
            .iter()
            .zip(&aggregated)
            .fold((0.0, 0.0), |(weighted, total), (&x, &mu)| {
                (weighted + x * mu, total + mu)
            });

        let fired = total > 0.0;
        let green = if fired {
            weighted / total
        } else {
            self.green.universe().midpoint()
        };
        if !green.is_finite() {
            return Err(InferenceError::NonFiniteOutput);
        }

        Ok(Inference {
            density,
            wait,
            density_degrees,
            wait_degrees,
            rule_strengths,
            clip_levels,
            aggregated,
            fired,
            green,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> InferenceEngine {
        InferenceEngine::traffic().unwrap()
    }

    #[test]
    fn standard_engine_has_full_rule_table() {
        let engine = engine();
        assert_eq!(engine.rules().len(), 9);
        assert_eq!(engine.density().term_count(), 3);
        assert_eq!(engine.green().universe().points().len(), 86);
    }

    #[test]
    fn single_rule_path_matches_discrete_centroid() {
        // Only low/short fires, at full strength: centroid of the unclipped short term.
        let inference = engine().infer_detailed(20.0, 25.0).unwrap();
        assert_eq!(inference.rule_strengths[0], 1.0);
        assert!(inference.rule_strengths[1..].iter().all(|&s| s == 0.0));
        let expected = (200.0 + 2660.0 / 15.0) / 23.0;
        assert!((inference.green - expected).abs() < 1e-9);
    }

    #[test]
    fn symmetric_medium_term_defuzzifies_to_apex() {
        let green = engine().infer(50.0, 60.0).unwrap();
        assert!((green - 40.0).abs() < 1e-9);
    }

    #[test]
    fn shared_consequents_take_the_maximum() {
        // density 35: low 0.5, medium 0.4; wait 95: long 1.0.
        // low/long and medium/long feed medium (0.5) and long (0.4) respectively.
        let inference = engine().infer_detailed(35.0, 95.0).unwrap();
        assert!((inference.clip_levels[1] - 0.5).abs() < 1e-12);
        assert!((inference.clip_levels[2] - 0.4).abs() < 1e-12);
        assert_eq!(inference.clip_levels[0], 0.0);
        assert!(inference.aggregated.iter().all(|&mu| mu <= 0.5 + 1e-12));
    }

    #[test]
    fn no_firing_rule_falls_back_to_midpoint() {
        let density = LinguisticVariable::new("density", Universe::new(0.0, 100.0, 1.0).unwrap())
            .with_term("high", MembershipFunction::trapezoid(80.0, 90.0, 100.0, 100.0))
            .unwrap();
        let wait = LinguisticVariable::new("wait", Universe::new(0.0, 120.0, 1.0).unwrap())
            .with_term("long", MembershipFunction::trapezoid(90.0, 100.0, 120.0, 120.0))
            .unwrap();
        let green = LinguisticVariable::new("green", Universe::new(5.0, 90.0, 1.0).unwrap())
            .with_term("long", MembershipFunction::trapezoid(45.0, 60.0, 90.0, 90.0))
            .unwrap();
        let engine =
            InferenceEngine::new(density, wait, green, vec![Rule::new("high", "long", "long")])
                .unwrap();

        let inference = engine.infer_detailed(10.0, 10.0).unwrap();
        assert!(!inference.fired);
        assert_eq!(inference.green, 47.5);
    }

    #[test]
    fn partial_rule_table_is_rejected() {
        let traffic = engine();
        let err = InferenceEngine::new(
            traffic.density().clone(),
            traffic.wait().clone(),
            traffic.green().clone(),
            vec![Rule::new("low", "short", "short")],
        )
        .unwrap_err();
        assert!(matches!(err, FuzzyError::IncompleteRuleBase { .. }));
    }

    #[test]
    fn non_finite_input_is_an_error() {
        assert!(matches!(
            engine().infer(f64::NAN, 10.0),
            Err(InferenceError::NonFiniteInput {
                variable: "density",
                ..
            })
        ));
        assert!(engine().infer(10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn output_stays_in_green_universe() {
        let engine = engine();
        for density in (0..=100).step_by(5) {
            for wait in (0..=120).step_by(5) {
                let green = engine.infer(density as f64, wait as f64).unwrap();
                assert!((5.0..=90.0).contains(&green), "{density}/{wait} -> {green}");
            }
        }
    }
}
