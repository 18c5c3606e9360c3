// fuzzy/variable.rs

use crate::fuzzy::membership::MembershipFunction;
use crate::fuzzy::FuzzyError;

/// A discretised, closed range `[start, end]` sampled every `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    start: f64,
    end: f64,
    step: f64,
    points: Vec<f64>,
}

impl Universe {
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, FuzzyError> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) || step <= 0.0 || end < start
        {
            return Err(FuzzyError::InvalidUniverse { start, end, step });
        }
        let count = ((end - start) / step).round() as usize + 1;
        let points = (0..count).map(|i| start + i as f64 * step).collect();
        Ok(Self {
            start,
            end,
            step,
            points,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.start, self.end)
    }
}

/// A named input or output axis together with its linguistic terms.
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<(String, MembershipFunction)>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    /// Builder-style [`add_term`](Self::add_term).
    pub fn with_term(
        mut self,
        term: impl Into<String>,
        shape: MembershipFunction,
    ) -> Result<Self, FuzzyError> {
        self.add_term(term, shape)?;
        Ok(self)
    }

    pub fn add_term(
        &mut self,
        term: impl Into<String>,
        shape: MembershipFunction,
    ) -> Result<(), FuzzyError> {
        let term = term.into();
        if !shape.is_well_formed() {
            return Err(FuzzyError::InvalidShape {
                variable: self.name.clone(),
                term,
                points: shape.points().to_vec(),
            });
        }
        if self.term_index(&term).is_some() {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name.clone(),
                term,
            });
        }
        self.terms.push((term, shape));
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &MembershipFunction)> {
        self.terms.iter().map(|(name, mf)| (name.as_str(), mf))
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.iter().position(|(name, _)| name == term)
    }

    pub fn term_name(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|(name, _)| name.as_str())
    }

    /// Degree of every term at `x`, in term order.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|(_, mf)| mf.degree(x)).collect()
    }

    /// One term's membership sampled over the whole universe.
    pub fn sample(&self, index: usize) -> Vec<f64> {
        match self.terms.get(index) {
            Some((_, mf)) => self.universe.points().iter().map(|&x| mf.degree(x)).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_includes_both_ends() {
        let green = Universe::new(5.0, 90.0, 1.0).unwrap();
        assert_eq!(green.points().len(), 86);
        assert_eq!(green.points()[0], 5.0);
        assert_eq!(*green.points().last().unwrap(), 90.0);
        assert_eq!(green.midpoint(), 47.5);
    }

    #[test]
    fn universe_rejects_bad_step() {
        assert!(Universe::new(0.0, 10.0, 0.0).is_err());
        assert!(Universe::new(10.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn duplicate_terms_are_rejected() {
        let var = LinguisticVariable::new("wait", Universe::new(0.0, 120.0, 1.0).unwrap())
            .with_term("short", MembershipFunction::trapezoid(0.0, 0.0, 30.0, 50.0))
            .unwrap();
        let err = var
            .with_term("short", MembershipFunction::triangle(30.0, 60.0, 90.0))
            .unwrap_err();
        assert!(matches!(err, FuzzyError::DuplicateTerm { .. }));
    }

    #[test]
    fn fuzzify_follows_term_order() {
        let var = LinguisticVariable::new("density", Universe::new(0.0, 100.0, 1.0).unwrap())
            .with_term("low", MembershipFunction::trapezoid(0.0, 0.0, 25.0, 45.0))
            .unwrap()
            .with_term("medium", MembershipFunction::triangle(25.0, 50.0, 75.0))
            .unwrap();
        let degrees = var.fuzzify(35.0);
        assert!((degrees[0] - 0.5).abs() < 1e-12);
        assert!((degrees[1] - 0.4).abs() < 1e-12);
        assert_eq!(var.term_name(1), Some("medium"));
        assert_eq!(var.sample(0).len(), 101);
    }
}
