//! Fresh blank node identifiers
//!
//! Lowering lists and conjunctions needs blank nodes that the input never
//! mentions. The allocator remembers every label it has been shown and skips
//! them when handing out new ones.

use crate::{BlankId, Term};
use std::collections::HashSet;

/// Allocator of blank node identifiers unique within one document
#[derive(Clone, Debug)]
pub struct BlankNodeAllocator {
    prefix: String,
    next: u64,
    taken: HashSet<String>,
}

impl Default for BlankNodeAllocator {
    fn default() -> Self {
        Self::new("g")
    }
}

impl BlankNodeAllocator {
    /// Create an allocator that produces `<prefix>0`, `<prefix>1`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
            taken: HashSet::new(),
        }
    }

    /// Record a label already present in the document
    pub fn observe(&mut self, label: &str) {
        self.taken.insert(label.to_string());
    }

    /// Produce a fresh blank node id
    pub fn fresh(&mut self) -> BlankId {
        loop {
            let label = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if self.taken.insert(label.clone()) {
                return BlankId::new(label);
            }
        }
    }

    /// Produce a fresh blank node term
    pub fn fresh_term(&mut self) -> Term {
        Term::BlankNode(self.fresh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_distinct() {
        let mut alloc = BlankNodeAllocator::new("l");
        assert_eq!(alloc.fresh().as_str(), "l0");
        assert_eq!(alloc.fresh().as_str(), "l1");
    }

    #[test]
    fn test_fresh_skips_observed_labels() {
        let mut alloc = BlankNodeAllocator::default();
        alloc.observe("g0");
        alloc.observe("g2");
        assert_eq!(alloc.fresh().as_str(), "g1");
        assert_eq!(alloc.fresh().as_str(), "g3");
    }
}
