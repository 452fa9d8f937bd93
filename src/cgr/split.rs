use std::collections::BTreeSet;

use log::{debug, trace};

use crate::graph_ops::{connected_components, has_path};
use crate::mol::AtomNumber;

use super::bond_change::{is_single_formed, substitution_paths};
use super::Cgr;

/// Result of cutting a reaction graph at its reaction centers.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// The graph with the cut bonds removed. Bond pairs of the remaining
    /// edges are untouched.
    pub graph: Cgr,
    /// Connected components of `graph`, ordered by smallest atom number.
    pub components: Vec<Vec<AtomNumber>>,
    /// `(pivot, departed)` for every substitution path, deduplicated.
    pub lost_bonds: Vec<(AtomNumber, AtomNumber)>,
    /// Both ends of every forming bond that was cut.
    pub terminal_atoms: BTreeSet<AtomNumber>,
}

impl Split {
    /// Departed atoms of all lost bonds.
    pub fn x_terminals(&self) -> BTreeSet<AtomNumber> {
        self.lost_bonds.iter().map(|&(_, departed)| departed).collect()
    }

    /// Pivot atoms of all lost bonds.
    pub fn r_terminals(&self) -> BTreeSet<AtomNumber> {
        self.lost_bonds.iter().map(|&(pivot, _)| pivot).collect()
    }
}

/// Cut substitution paths and isolated forming bonds out of `g`.
///
/// First every substitution path loses both its breaking and its forming
/// bond. Then each remaining single forming bond is cut unless one of its
/// ends is still connected to an atom of a lost bond.
pub fn split_graph(g: &Cgr) -> Split {
    let mut cut = g.clone();
    let mut lost_bonds: Vec<(AtomNumber, AtomNumber)> = Vec::new();

    for (departing, pivot, arriving) in substitution_paths(g) {
        let lost = (pivot, departing);
        if lost_bonds.contains(&lost) {
            continue;
        }
        trace!("substitution path {departing} -> {pivot} <- {arriving}");
        lost_bonds.push(lost);
        cut.remove_bond(pivot, departing);
        cut.remove_bond(pivot, arriving);
    }

    let forming: Vec<(AtomNumber, AtomNumber)> = cut
        .bond_list()
        .filter(|(_, _, bond)| is_single_formed(bond))
        .map(|(a, b, _)| (a, b))
        .collect();

    let lost_atoms: Vec<AtomNumber> = lost_bonds.iter().flat_map(|&(p, d)| [p, d]).collect();
    let mut terminal_atoms = BTreeSet::new();
    for (n, m) in forming {
        let anchored = lost_atoms
            .iter()
            .any(|&x| has_path(&cut, x, n) || has_path(&cut, x, m));
        if anchored {
            continue;
        }
        cut.remove_bond(n, m);
        terminal_atoms.insert(n);
        terminal_atoms.insert(m);
    }

    let components = connected_components(&cut);
    debug!(
        "split into {} components, {} lost bonds, {} terminal atoms",
        components.len(),
        lost_bonds.len(),
        terminal_atoms.len()
    );
    Split {
        graph: cut,
        components,
        lost_bonds,
        terminal_atoms,
    }
}
