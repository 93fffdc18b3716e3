//! Bounded ranked formula beam (spec §3.4, §4.4.4), a `Vec`-backed stand-in
//! for the original's `boost::container::flat_set<NodeWrapper>`: candidates
//! stay sorted by the composite key so the eviction target is always at
//! index 0.

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use crate::ast::Formula;

#[derive(Clone)]
pub struct Candidate {
    pub formula: Arc<Formula>,
    pub accuracy: f64,
    pub depth: usize,
}

/// Which tail of the accuracy distribution a bank keeps.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    /// Retains the highest-accuracy candidates.
    Best,
    /// Retains the lowest-accuracy candidates (a perfect 0% classifier is a
    /// negated perfect classifier).
    Worst,
}

/// Composite ordering key (spec §3.4): `(accuracy, -size, structural)`,
/// oriented per `Bank` so that the entry at the front of the sorted vector
/// is always the one to evict next.
fn composite_cmp(bank: Bank, a: &Candidate, b: &Candidate) -> Ordering {
    let acc_cmp = a.accuracy.partial_cmp(&b.accuracy).unwrap_or(Ordering::Equal);
    let acc_cmp = match bank {
        Bank::Best => acc_cmp,
        Bank::Worst => acc_cmp.reverse(),
    };
    acc_cmp
        .then_with(|| b.formula.size().cmp(&a.formula.size()))
        .then_with(|| b.formula.cmp(&a.formula))
}

/// A single bounded bank, ordered so `entries[0]` is always the weakest
/// member currently admitted.
pub struct Beam {
    bank: Bank,
    capacity: usize,
    entries: Vec<Candidate>,
}

impl Beam {
    pub fn new(bank: Bank, capacity: usize) -> Beam {
        Beam {
            bank,
            capacity,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Try to admit `candidate` (spec §4.4.4). Returns `true` if admitted.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if self.entries.len() < self.capacity {
            let pos = self
                .entries
                .binary_search_by(|e| composite_cmp(self.bank, e, &candidate))
                .unwrap_or_else(|i| i);
            self.entries.insert(pos, candidate);
            return true;
        }
        if composite_cmp(self.bank, &self.entries[0], &candidate) == Ordering::Less {
            self.entries.remove(0);
            let pos = self
                .entries
                .binary_search_by(|e| composite_cmp(self.bank, e, &candidate))
                .unwrap_or_else(|i| i);
            self.entries.insert(pos, candidate);
            return true;
        }
        false
    }

    /// Truncate to `max_formulas` by repeatedly dropping the weakest member
    /// (spec §4.4.2 step 7's "truncate each bank to `max_formulas`").
    pub fn truncate_to(&mut self, max_formulas: usize) {
        while self.entries.len() > max_formulas {
            self.entries.remove(0);
        }
    }

    /// Consumes the beam, returning entries ranked best-for-this-bank first:
    /// highest accuracy first for `Best`, lowest accuracy first for `Worst`.
    pub fn into_sorted_desc(self) -> Vec<Candidate> {
        let mut v = self.entries;
        v.reverse();
        v
    }
}

/// Thread-safe wrapper so `rayon` worker closures can admit candidates under
/// a single lock (spec §5's "fine-grained admission locking").
pub struct SharedBeam(Mutex<Beam>);

impl SharedBeam {
    pub fn new(bank: Bank, capacity: usize) -> SharedBeam {
        SharedBeam(Mutex::new(Beam::new(bank, capacity)))
    }

    pub fn offer(&self, candidate: Candidate) -> bool {
        self.0.lock().expect("beam mutex poisoned").offer(candidate)
    }

    pub fn into_inner(self) -> Beam {
        self.0.into_inner().expect("beam mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(acc: f64, formula: Arc<Formula>) -> Candidate {
        Candidate {
            formula,
            accuracy: acc,
            depth: 1,
        }
    }

    #[test]
    fn best_bank_evicts_lowest_accuracy_when_full() {
        let mut beam = Beam::new(Bank::Best, 2);
        assert!(beam.offer(cand(0.5, Formula::variable(0))));
        assert!(beam.offer(cand(0.6, Formula::variable(1))));
        assert!(!beam.offer(cand(0.4, Formula::variable(2))));
        assert!(beam.offer(cand(0.9, Formula::variable(3))));
        let accs: Vec<f64> = beam.into_sorted_desc().iter().map(|c| c.accuracy).collect();
        assert_eq!(accs, vec![0.9, 0.6]);
    }

    #[test]
    fn worst_bank_evicts_highest_accuracy_when_full() {
        let mut beam = Beam::new(Bank::Worst, 2);
        assert!(beam.offer(cand(0.5, Formula::variable(0))));
        assert!(beam.offer(cand(0.4, Formula::variable(1))));
        assert!(!beam.offer(cand(0.6, Formula::variable(2))));
        assert!(beam.offer(cand(0.1, Formula::variable(3))));
        let accs: Vec<f64> = beam.into_sorted_desc().iter().map(|c| c.accuracy).collect();
        assert_eq!(accs, vec![0.1, 0.4]);
    }

    #[test]
    fn beam_bank_invariant_never_exceeds_capacity() {
        let mut beam = Beam::new(Bank::Best, 3);
        for i in 0..10u32 {
            beam.offer(cand(i as f64 / 10.0, Formula::variable(i)));
            assert!(beam.len() <= 3);
        }
    }
}
