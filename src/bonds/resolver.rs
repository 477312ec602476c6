//! Reciprocal bond resolution over an immutable atom list.
//!
//! Every ordered atom pair `(e, m)` is visited in sequence order (outer loop
//! `e`, inner loop `m`). A bond is produced when `m` still has an open
//! intent toward `e` *and* `e` still has an open intent toward `m`; both
//! intents are then consumed. The bond type is read from `m`'s intent, so
//! for atoms at positions `i < j` the later atom's declaration wins.
//!
//! Consumption is tracked in a side table instead of mutating the records,
//! so the same atom list can be resolved any number of times.

use rustc_hash::FxHashMap;

use crate::model::{Atom, BondType};

/// A bond confirmed by both of its atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBond {
    /// Index of the outer-loop atom; the bond is oriented from here.
    pub a: usize,
    /// Index of the inner-loop atom; the bond points toward here.
    pub b: usize,
    /// Multiplicity, taken from `b`'s intent.
    pub kind: BondType,
}

/// Why a bond intent was left unconsumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanglingReason {
    /// No atom in the model carries the referenced uid.
    UnknownTarget,
    /// The referenced atom has no open intent back toward this one.
    NotReciprocated,
    /// The atom references itself.
    SelfReference,
}

/// A bond intent that did not take part in any resolved bond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingIntent {
    /// Index of the declaring atom.
    pub atom: usize,
    /// Position of the intent in the atom's `targets`.
    pub entry: usize,
    /// The referenced uid.
    pub target: String,
    /// Classification.
    pub reason: DanglingReason,
}

/// Output of [`resolve_bonds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondResolution {
    /// Resolved bonds in discovery order.
    pub bonds: Vec<ResolvedBond>,
    /// Intents left open, in atom then entry order.
    pub dangling: Vec<DanglingIntent>,
}

/// Resolve reciprocal bond intents into a deduplicated bond list.
#[must_use]
pub fn resolve_bonds(atoms: &[Atom]) -> BondResolution {
    let mut consumed: Vec<Vec<bool>> = atoms
        .iter()
        .map(|atom| vec![false; atom.targets.len()])
        .collect();
    let mut bonds = Vec::new();

    for (ei, e) in atoms.iter().enumerate() {
        for (mi, m) in atoms.iter().enumerate() {
            if ei == mi {
                continue;
            }
            let Some(m_entry) = first_open(m, &consumed[mi], &e.uid) else {
                continue;
            };
            let Some(e_entry) = first_open(e, &consumed[ei], &m.uid) else {
                continue;
            };

            consumed[mi][m_entry] = true;
            consumed[ei][e_entry] = true;
            bonds.push(ResolvedBond {
                a: ei,
                b: mi,
                kind: m.targets[m_entry].kind,
            });
        }
    }

    let dangling = collect_dangling(atoms, &consumed);
    for intent in &dangling {
        log::debug!(
            "unresolved bond intent {} -> {} ({:?})",
            atoms[intent.atom].uid,
            intent.target,
            intent.reason
        );
    }

    BondResolution { bonds, dangling }
}

/// First unconsumed intent of `atom` referencing `uid`.
fn first_open(atom: &Atom, consumed: &[bool], uid: &str) -> Option<usize> {
    atom.targets
        .iter()
        .zip(consumed)
        .position(|(target, &used)| !used && target.target == uid)
}

fn collect_dangling(
    atoms: &[Atom],
    consumed: &[Vec<bool>],
) -> Vec<DanglingIntent> {
    let mut by_uid: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, atom) in atoms.iter().enumerate() {
        if by_uid.contains_key(atom.uid.as_str()) {
            log::warn!("duplicate atom uid {:?} in one model", atom.uid);
        } else {
            let _ = by_uid.insert(atom.uid.as_str(), i);
        }
    }

    let mut dangling = Vec::new();
    for (i, atom) in atoms.iter().enumerate() {
        for (entry, (target, &used)) in
            atom.targets.iter().zip(&consumed[i]).enumerate()
        {
            if used {
                continue;
            }
            let reason = if target.target == atom.uid {
                DanglingReason::SelfReference
            } else if by_uid.contains_key(target.target.as_str()) {
                DanglingReason::NotReciprocated
            } else {
                DanglingReason::UnknownTarget
            };
            dangling.push(DanglingIntent {
                atom: i,
                entry,
                target: target.target.clone(),
                reason,
            });
        }
    }
    dangling
}
