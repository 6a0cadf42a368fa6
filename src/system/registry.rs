//! Variable Registry
//!
//! Name → variable map that also serves as the [`DomStore`] rule trees read
//! from and write into. Variables are never removed, so a variable's
//! [`VariableId`] (its registration index) stays valid for the registry's
//! lifetime.

use indexmap::IndexMap;

use crate::membership::MembershipFunction;
use crate::proposition::{DomStore, SetRef};
use crate::variable::{Variable, VariableId};
use crate::{FuzzyError, Result};

/// Insertion-ordered, case-sensitive collection of variables
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    variables: IndexMap<String, Variable>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Register a new, empty variable
    pub fn insert(&mut self, name: &str) -> Result<&mut Variable> {
        if name.is_empty() {
            return Err(FuzzyError::EmptyVariableId);
        }
        if self.contains(name) {
            return Err(FuzzyError::DuplicateVariable(name.to_string()));
        }
        let index = self.variables.len();
        self.variables
            .insert(name.to_string(), Variable::new(VariableId::new(index), name));
        Ok(&mut self.variables[index])
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    pub fn by_id(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get_index(id.index()).map(|(_, v)| v)
    }

    pub fn by_id_mut(&mut self, id: VariableId) -> Option<&mut Variable> {
        self.variables.get_index_mut(id.index()).map(|(_, v)| v)
    }

    /// Id of the variable registered under `name`
    pub fn id_of(&self, name: &str) -> Option<VariableId> {
        self.variables.get_index_of(name).map(VariableId::new)
    }

    /// Variables in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Membership function a set reference points at, if it exists
    pub fn resolve(&self, set: SetRef) -> Option<&MembershipFunction> {
        self.by_id(set.variable).and_then(|v| v.set(set.index))
    }
}

impl DomStore for VariableRegistry {
    fn dom(&self, set: SetRef) -> f32 {
        self.resolve(set).map(|s| s.get_dom()).unwrap_or(0.0)
    }

    fn set_dom(&mut self, set: SetRef, dom: f32) {
        if let Some(s) = self
            .by_id_mut(set.variable)
            .and_then(|v| v.set_mut(set.index))
        {
            s.set_dom(dom);
        }
    }
}
