//! Classification of paired bond states.

use crate::bond::{BondOrder, DynBond};
use crate::mol::{AtomNumber, Mol};

use super::error::CgrError;
use super::Cgr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondChange {
    /// Same order on both sides.
    Unchanged,
    /// Absent in the reactants, present in the products.
    Formed,
    /// Present in the reactants, absent in the products.
    Broken,
    /// Present on both sides with different orders.
    Changed,
}

/// Classify an edge by its paired bond state.
///
/// Fails with [`CgrError::InvalidInput`] when both slots are empty.
pub fn classify_bond(
    a: AtomNumber,
    b: AtomNumber,
    bond: &DynBond,
) -> Result<BondChange, CgrError> {
    match (bond.reactant, bond.product) {
        (None, None) => Err(CgrError::InvalidInput(a, b)),
        (None, Some(_)) => Ok(BondChange::Formed),
        (Some(_), None) => Ok(BondChange::Broken),
        (Some(r), Some(p)) if r == p => Ok(BondChange::Unchanged),
        (Some(_), Some(_)) => Ok(BondChange::Changed),
    }
}

/// Reject graphs with an edge absent on both sides.
pub fn validate(g: &Cgr) -> Result<(), CgrError> {
    for (a, b, bond) in g.bond_list() {
        classify_bond(a, b, bond)?;
    }
    Ok(())
}

pub(crate) fn is_single_broken(bond: &DynBond) -> bool {
    *bond == DynBond::broken(BondOrder::Single)
}

pub(crate) fn is_single_formed(bond: &DynBond) -> bool {
    *bond == DynBond::formed(BondOrder::Single)
}

/// Whether `pivot` joins `first` and `second` by one single bond that breaks
/// and one that forms, in either neighbor order.
pub fn is_substitution_path(
    g: &Cgr,
    first: AtomNumber,
    pivot: AtomNumber,
    second: AtomNumber,
) -> bool {
    match (g.bond_by_numbers(pivot, first), g.bond_by_numbers(pivot, second)) {
        (Some(x), Some(y)) => {
            (is_single_broken(x) && is_single_formed(y))
                || (is_single_formed(x) && is_single_broken(y))
        }
        _ => false,
    }
}

/// Every substitution path as `(departing, pivot, arriving)`.
///
/// Pivots are visited in arena order and neighbor pairs in adjacency order;
/// a pivot with several breaking or forming neighbors yields one triple per
/// combination.
pub fn substitution_paths<A>(g: &Mol<A, DynBond>) -> Vec<(AtomNumber, AtomNumber, AtomNumber)> {
    let mut paths = Vec::new();
    for pivot in g.atoms() {
        let neighbors: Vec<_> = g
            .neighbors(pivot)
            .filter_map(|n| g.bond_between(pivot, n).map(|e| (n, *g.bond(e))))
            .collect();
        for (i, (m, m_bond)) in neighbors.iter().enumerate() {
            for (l, l_bond) in &neighbors[i + 1..] {
                let triple = if is_single_broken(m_bond) && is_single_formed(l_bond) {
                    (*m, pivot, *l)
                } else if is_single_formed(m_bond) && is_single_broken(l_bond) {
                    (*l, pivot, *m)
                } else {
                    continue;
                };
                paths.push((g.number(triple.0), g.number(triple.1), g.number(triple.2)));
            }
        }
    }
    paths
}
