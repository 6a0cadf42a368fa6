//! Fuzzy Propositions
//!
//! Evaluation trees for rule antecedents and consequents.
//!
//! ## Overview
//!
//! A proposition is one node of a closed set of kinds:
//!
//! | Node | `get_dom` | `aggregate(s)` |
//! |------|-----------|----------------|
//! | `Set(r)` | cached dom of set `r` | dom(r) = max(dom(r), s) |
//! | `And(c)` | min over children (empty ⇒ 0) | broadcast `s` |
//! | `Or(c)` | max over children (empty ⇒ 0) | broadcast `s` |
//! | `Fairly(p)` | dom(p)² | aggregate √s into `p` |
//!
//! Nodes live in a [`PropositionArena`] and refer to each other through
//! [`PropositionId`] handles. Leaves name a membership function by
//! [`SetRef`] (variable id + set index) rather than by reference, and every
//! read or write of a cached dom goes through a [`DomStore`]. A child is
//! always created before its parent, so trees are acyclic by construction.
//!
//! ## Example
//!
//! ```ignore
//! let mut arena = PropositionArena::new();
//! let cold = arena.term(cold_ref);
//! let wet = arena.term(wet_ref);
//! let miserable = arena.and(&[cold, wet])?;
//!
//! let strength = arena.get_dom(miserable, &registry);
//! ```

use crate::variable::VariableId;
use crate::{FuzzyError, Result};

/// Maximum number of children in an AND / OR composite
pub const MAX_TERMS: usize = 4;

/// Non-owning reference to a membership function: owning variable + set index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetRef {
    /// Variable that owns the set
    pub variable: VariableId,
    /// Position of the set within its variable (insertion order)
    pub index: usize,
}

impl SetRef {
    pub fn new(variable: VariableId, index: usize) -> Self {
        Self { variable, index }
    }
}

/// Handle to a node in a [`PropositionArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropositionId(u32);

impl PropositionId {
    /// Position of the node in its arena
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Raw handle value
    #[inline]
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Read/write access to the cached dom of membership functions
///
/// Implemented by whoever owns the sets (see
/// [`VariableRegistry`](crate::system::VariableRegistry)). Lookups of a
/// reference the store does not know read as 0 and ignore writes.
pub trait DomStore {
    /// Current cached dom of `set`
    fn dom(&self, set: SetRef) -> f32;

    /// Overwrite the cached dom of `set`
    fn set_dom(&mut self, set: SetRef, dom: f32);
}

// ============================================================================
// Nodes
// ============================================================================

/// Fixed-capacity child list of an AND / OR node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composite {
    terms: [PropositionId; MAX_TERMS],
    len: u8,
}

impl Composite {
    /// Build from up to [`MAX_TERMS`] children
    pub fn new(terms: &[PropositionId]) -> Result<Self> {
        if terms.len() > MAX_TERMS {
            return Err(FuzzyError::CompositeOverflow {
                max: MAX_TERMS,
                got: terms.len(),
            });
        }
        let mut slots = [PropositionId(0); MAX_TERMS];
        slots[..terms.len()].copy_from_slice(terms);
        Ok(Self {
            terms: slots,
            len: terms.len() as u8,
        })
    }

    /// Children in insertion order
    #[inline]
    pub fn terms(&self) -> &[PropositionId] {
        &self.terms[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One node of a proposition tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposition {
    /// Leaf wrapping one membership function
    Set(SetRef),
    /// Conjunction (min)
    And(Composite),
    /// Disjunction (max)
    Or(Composite),
    /// "fairly" hedge: squares on read, square-roots on write
    Fairly(PropositionId),
}

// ============================================================================
// Arena
// ============================================================================

/// Append-only storage for proposition nodes
#[derive(Debug, Clone, Default)]
pub struct PropositionArena {
    nodes: Vec<Proposition>,
}

impl PropositionArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if `id` was issued by this arena
    #[inline]
    pub fn contains(&self, id: PropositionId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Node behind a handle
    pub fn get(&self, id: PropositionId) -> Option<&Proposition> {
        self.nodes.get(id.index())
    }

    fn push(&mut self, node: Proposition) -> PropositionId {
        let id = PropositionId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn check(&self, id: PropositionId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(FuzzyError::UnknownProposition(id.raw()))
        }
    }

    /// Leaf node for one membership function
    pub fn term(&mut self, set: SetRef) -> PropositionId {
        self.push(Proposition::Set(set))
    }

    /// Conjunction of up to [`MAX_TERMS`] existing nodes
    pub fn and(&mut self, terms: &[PropositionId]) -> Result<PropositionId> {
        let composite = self.composite(terms)?;
        Ok(self.push(Proposition::And(composite)))
    }

    /// Disjunction of up to [`MAX_TERMS`] existing nodes
    pub fn or(&mut self, terms: &[PropositionId]) -> Result<PropositionId> {
        let composite = self.composite(terms)?;
        Ok(self.push(Proposition::Or(composite)))
    }

    /// "fairly" hedge over an existing node
    pub fn fairly(&mut self, term: PropositionId) -> Result<PropositionId> {
        self.check(term)?;
        Ok(self.push(Proposition::Fairly(term)))
    }

    fn composite(&self, terms: &[PropositionId]) -> Result<Composite> {
        let composite = Composite::new(terms)?;
        for &t in composite.terms() {
            self.check(t)?;
        }
        Ok(composite)
    }

    /// Deep-copy the subtree rooted at `id`
    ///
    /// Every interior node is copied; leaves keep pointing at the same
    /// membership function.
    pub fn duplicate(&mut self, id: PropositionId) -> Result<PropositionId> {
        let node = *self
            .get(id)
            .ok_or(FuzzyError::UnknownProposition(id.raw()))?;
        let copy = match node {
            Proposition::Set(set) => Proposition::Set(set),
            Proposition::And(c) => Proposition::And(self.duplicate_composite(&c)?),
            Proposition::Or(c) => Proposition::Or(self.duplicate_composite(&c)?),
            Proposition::Fairly(child) => Proposition::Fairly(self.duplicate(child)?),
        };
        Ok(self.push(copy))
    }

    fn duplicate_composite(&mut self, composite: &Composite) -> Result<Composite> {
        let mut copies = Vec::with_capacity(composite.len());
        for &t in composite.terms() {
            copies.push(self.duplicate(t)?);
        }
        Composite::new(&copies)
    }

    /// Truth value of a node given the store's current cached doms
    pub fn get_dom<S: DomStore + ?Sized>(&self, id: PropositionId, store: &S) -> f32 {
        debug_assert!(self.contains(id), "unknown proposition {}", id.raw());
        let Some(node) = self.get(id) else {
            return 0.0;
        };
        match node {
            Proposition::Set(set) => store.dom(*set),
            Proposition::And(c) => c
                .terms()
                .iter()
                .map(|&t| self.get_dom(t, store))
                .reduce(f32::min)
                .unwrap_or(0.0),
            Proposition::Or(c) => c
                .terms()
                .iter()
                .map(|&t| self.get_dom(t, store))
                .reduce(f32::max)
                .unwrap_or(0.0),
            Proposition::Fairly(child) => {
                let dom = self.get_dom(*child, store);
                dom * dom
            }
        }
    }

    /// Push a firing strength down into every set the node reaches
    pub fn aggregate<S: DomStore + ?Sized>(&self, id: PropositionId, strength: f32, store: &mut S) {
        debug_assert!(self.contains(id), "unknown proposition {}", id.raw());
        let Some(node) = self.get(id) else {
            return;
        };
        match node {
            Proposition::Set(set) => {
                let current = store.dom(*set);
                store.set_dom(*set, current.max(strength));
            }
            Proposition::And(c) | Proposition::Or(c) => {
                for &t in c.terms() {
                    self.aggregate(t, strength, store);
                }
            }
            Proposition::Fairly(child) => self.aggregate(*child, strength.sqrt(), store),
        }
    }

    /// Every set the subtree rooted at `id` reads from, depth first
    pub fn set_refs(&self, id: PropositionId) -> Vec<SetRef> {
        let mut out = Vec::new();
        self.collect_set_refs(id, &mut out);
        out
    }

    fn collect_set_refs(&self, id: PropositionId, out: &mut Vec<SetRef>) {
        match self.get(id) {
            Some(Proposition::Set(set)) => out.push(*set),
            Some(Proposition::And(c)) | Some(Proposition::Or(c)) => {
                for &t in c.terms() {
                    self.collect_set_refs(t, out);
                }
            }
            Some(Proposition::Fairly(child)) => self.collect_set_refs(*child, out),
            None => {}
        }
    }
}
