//! Inference System
//!
//! Owns everything a fuzzy controller needs: the variables, the proposition
//! arena, the rule base, and the numeric configuration. A query runs the
//! full Mamdani cycle:
//!
//! 1. `fuzzify` each input variable with a crisp value
//! 2. reset the output variable's doms
//! 3. fire every rule in registration order (max-accumulation)
//! 4. defuzzify the output (mean-of-maximum or centroid)
//!
//! Steps 2-4 are bundled into the `defuzzify_*` methods so a stale
//! accumulation from a previous query can never leak into a new one.

pub mod registry;

pub use registry::VariableRegistry;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::proposition::{DomStore, PropositionArena, PropositionId, SetRef};
use crate::rule::Rule;
use crate::variable::{Variable, VariableId};
use crate::{FuzzyError, Result};

/// A complete fuzzy rule system
#[derive(Debug, Clone, Default)]
pub struct InferenceSystem {
    config: EngineConfig,
    variables: VariableRegistry,
    arena: PropositionArena,
    rules: Vec<Rule>,
}

impl InferenceSystem {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- Variables ----

    /// Register a new, empty variable and hand it back for set construction
    pub fn add_variable(&mut self, id: &str) -> Result<&mut Variable> {
        let variable = self.variables.insert(id)?;
        debug!(variable = id, index = variable.id().index(), "registered variable");
        Ok(variable)
    }

    pub fn get_variable(&self, id: &str) -> Result<&Variable> {
        self.variables
            .get(id)
            .ok_or_else(|| FuzzyError::UnknownVariable(id.to_string()))
    }

    pub fn get_variable_mut(&mut self, id: &str) -> Result<&mut Variable> {
        self.variables
            .get_mut(id)
            .ok_or_else(|| FuzzyError::UnknownVariable(id.to_string()))
    }

    pub fn has_variable(&self, id: &str) -> bool {
        self.variables.contains(id)
    }

    pub fn variable_id(&self, id: &str) -> Result<VariableId> {
        self.variables
            .id_of(id)
            .ok_or_else(|| FuzzyError::UnknownVariable(id.to_string()))
    }

    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    // ---- Propositions ----

    /// Leaf proposition over an existing set
    pub fn term(&mut self, set: SetRef) -> Result<PropositionId> {
        if self.variables.resolve(set).is_none() {
            let variable = self
                .variables
                .by_id(set.variable)
                .map(|v| v.name().to_string())
                .unwrap_or_else(|| format!("#{}", set.variable.index()));
            return Err(FuzzyError::UnknownSet {
                variable,
                index: set.index,
            });
        }
        Ok(self.arena.term(set))
    }

    pub fn and(&mut self, terms: &[PropositionId]) -> Result<PropositionId> {
        self.arena.and(terms)
    }

    pub fn or(&mut self, terms: &[PropositionId]) -> Result<PropositionId> {
        self.arena.or(terms)
    }

    pub fn fairly(&mut self, term: PropositionId) -> Result<PropositionId> {
        self.arena.fairly(term)
    }

    /// Deep copy of a proposition tree
    pub fn duplicate(&mut self, id: PropositionId) -> Result<PropositionId> {
        self.arena.duplicate(id)
    }

    /// Current dom of a proposition, read from the variables' stored doms
    pub fn evaluate(&self, id: PropositionId) -> Result<f32> {
        self.check_proposition(id)?;
        Ok(self.arena.get_dom(id, &self.variables))
    }

    /// Stored dom of a single set, 0 for dangling references
    pub fn set_dom(&self, set: SetRef) -> f32 {
        self.variables.dom(set)
    }

    pub fn propositions(&self) -> &PropositionArena {
        &self.arena
    }

    // ---- Rules ----

    pub fn add_rule(&mut self, antecedent: PropositionId, consequent: PropositionId) -> Result<()> {
        self.check_proposition(antecedent)?;
        self.check_proposition(consequent)?;
        self.rules.push(Rule::new(antecedent, consequent));
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    // ---- Query cycle ----

    /// Set every set's dom on `id` from a crisp input
    pub fn fuzzify(&mut self, id: &str, input: f32) -> Result<()> {
        self.get_variable_mut(id)?.fuzzify(input);
        debug!(variable = id, input, "fuzzified");
        Ok(())
    }

    pub fn defuzzify_mean_max(&mut self, id: &str) -> Result<f32> {
        self.infer(id)?;
        let output = self.get_variable(id)?.defuzzify_mean_max(self.config.zero_tolerance);
        debug!(variable = id, output, "mean-of-maximum");
        Ok(output)
    }

    pub fn defuzzify_centroid(&mut self, id: &str, sample_count: usize) -> Result<f32> {
        if sample_count == 0 {
            return Err(FuzzyError::ZeroSampleCount);
        }
        self.infer(id)?;
        let output = self
            .get_variable(id)?
            .defuzzify_centroid(sample_count, self.config.zero_tolerance)?;
        debug!(variable = id, sample_count, output, "centroid");
        Ok(output)
    }

    /// Centroid with the configured default sample count
    pub fn defuzzify_centroid_default(&mut self, id: &str) -> Result<f32> {
        self.defuzzify_centroid(id, self.config.default_sample_count)
    }

    /// Reset the output variable, then fire the whole rule base into it
    fn infer(&mut self, id: &str) -> Result<()> {
        self.get_variable_mut(id)?.reset_dom();
        for (index, rule) in self.rules.iter().enumerate() {
            let strength = rule.calculate(&self.arena, &mut self.variables);
            trace!(rule = index, strength, "fired");
        }
        Ok(())
    }

    fn check_proposition(&self, id: PropositionId) -> Result<()> {
        if self.arena.contains(id) {
            Ok(())
        } else {
            Err(FuzzyError::UnknownProposition(id.raw()))
        }
    }
}
