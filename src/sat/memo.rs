//! Memoization of search verdicts keyed by complete assignment states.
//!
//! Keys are built from the whole variable→value mapping, never from a subset
//! of recently touched variables. Two assignments with the same mapping give
//! the same key regardless of the order their values were set in, and any
//! difference in any variable gives a different key.

use crate::sat::assignment::Value;
use bit_vec::BitVec;
use rustc_hash::FxHashMap;

/// Canonical snapshot of an assignment.
///
/// `assigned[i]` records whether variable `i` is known and `truth[i]` its value
/// when it is. `truth` is always false for unknown variables, which keeps the
/// encoding unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    assigned: BitVec,
    truth: BitVec,
}

impl CacheKey {
    #[must_use]
    pub fn from_values(values: &[Value]) -> Self {
        let mut assigned = BitVec::from_elem(values.len(), false);
        let mut truth = BitVec::from_elem(values.len(), false);
        for (i, value) in values.iter().enumerate() {
            match value {
                Value::True => {
                    assigned.set(i, true);
                    truth.set(i, true);
                }
                Value::False => assigned.set(i, true),
                Value::Unknown => {}
            }
        }
        Self { assigned, truth }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.assigned.len()
    }
}

/// A store of verdicts for exact assignment states.
pub trait Memo {
    /// The verdict recorded for `key`, if any.
    fn lookup(&mut self, key: &CacheKey) -> Option<bool>;

    fn store(&mut self, key: CacheKey, satisfiable: bool);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the engine should build keys at all.
    fn enabled(&self) -> bool {
        true
    }
}

/// A memo that remembers nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoMemo;

impl Memo for NoMemo {
    fn lookup(&mut self, _: &CacheKey) -> Option<bool> {
        None
    }

    fn store(&mut self, _: CacheKey, _: bool) {}

    fn len(&self) -> usize {
        0
    }

    fn enabled(&self) -> bool {
        false
    }
}

/// Hash map backed memo with hit/miss counters.
#[derive(Debug, Clone, Default)]
pub struct MemoCache {
    verdicts: FxHashMap<CacheKey, bool>,
    hits: usize,
    misses: usize,
}

impl MemoCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.verdicts.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Memo for MemoCache {
    fn lookup(&mut self, key: &CacheKey) -> Option<bool> {
        let verdict = self.verdicts.get(key).copied();
        if verdict.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        verdict
    }

    fn store(&mut self, key: CacheKey, satisfiable: bool) {
        self.verdicts.insert(key, satisfiable);
    }

    fn len(&self) -> usize {
        self.verdicts.len()
    }
}
