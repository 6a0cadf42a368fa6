//! Fuzzy Rules
//!
//! `IF antecedent THEN consequent`, Mamdani style: the rule's strength is the
//! antecedent's dom, and firing max-accumulates that strength into every set
//! the consequent reaches. Rules have no weights and no firing threshold; a
//! rule whose antecedent reads 0 simply contributes nothing.

use crate::proposition::{DomStore, PropositionArena, PropositionId};

/// One antecedent → consequent coupling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    antecedent: PropositionId,
    consequent: PropositionId,
}

impl Rule {
    pub fn new(antecedent: PropositionId, consequent: PropositionId) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    pub fn antecedent(&self) -> PropositionId {
        self.antecedent
    }

    pub fn consequent(&self) -> PropositionId {
        self.consequent
    }

    /// Fire the rule, returning the strength pushed into the consequent
    pub fn calculate<S: DomStore + ?Sized>(&self, arena: &PropositionArena, store: &mut S) -> f32 {
        let strength = arena.get_dom(self.antecedent, &*store);
        arena.aggregate(self.consequent, strength, store);
        strength
    }
}
