use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::graph_ops::{get_fragments, substructure, union_into};
use crate::mol::{AtomNumber, Mol};
use crate::substruct::{substruct_matches, AtomMapping};

use super::error::ReactionError;
use super::ReactionContainer;

/// Connected group of atoms that only the products contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedGroup {
    pub atoms: BTreeSet<AtomNumber>,
    /// First embedding of the group into the products' common-atom
    /// substructure, as group atom to common atom.
    pub mapping: Option<AtomMapping>,
}

/// Atom bookkeeping between the two sides of a reaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubstituentBalance {
    /// Atom numbers present only in the products.
    pub added: BTreeSet<AtomNumber>,
    /// Atom numbers present only in the reactants.
    pub removed: BTreeSet<AtomNumber>,
    /// Atom numbers present on both sides.
    pub common: BTreeSet<AtomNumber>,
    /// Per reactant, the removed atoms, when at least one of them is bonded
    /// to a common atom.
    pub removed_groups: Vec<BTreeSet<AtomNumber>>,
    /// Common atoms that lost a bond to a removed atom.
    pub skinned: BTreeSet<AtomNumber>,
    pub added_groups: Vec<AddedGroup>,
}

fn merge(
    section: &'static str,
    mols: &[Mol<Atom, Bond>],
) -> Result<Mol<Atom, Bond>, ReactionError> {
    let mut merged = Mol::new();
    for mol in mols {
        union_into(&mut merged, mol)
            .map_err(|source| ReactionError::OverlappingMolecules { section, source })?;
    }
    Ok(merged)
}

fn numbers(mol: &Mol<Atom, Bond>) -> BTreeSet<AtomNumber> {
    mol.numbers().collect()
}

impl ReactionContainer {
    /// Report which atom groups a reaction adds and removes.
    ///
    /// Each connected group of added atoms is also matched against the
    /// substructure the products share with the reactants, so a group that
    /// repeats an existing fragment can be recognized.
    pub fn balance_substituents(&self) -> Result<SubstituentBalance, ReactionError> {
        let reactants = merge("reactants", &self.reactants)?;
        let products = merge("products", &self.products)?;
        let r_numbers = numbers(&reactants);
        let p_numbers = numbers(&products);

        let mut balance = SubstituentBalance {
            added: p_numbers.difference(&r_numbers).copied().collect(),
            removed: r_numbers.difference(&p_numbers).copied().collect(),
            common: r_numbers.intersection(&p_numbers).copied().collect(),
            ..SubstituentBalance::default()
        };

        let common_products = substructure(&products, balance.common.iter().copied())?;

        for mol in &self.reactants {
            let group: BTreeSet<AtomNumber> = numbers(mol)
                .intersection(&balance.removed)
                .copied()
                .collect();
            if group.is_empty() {
                continue;
            }
            let skin: BTreeSet<AtomNumber> = group
                .iter()
                .flat_map(|&n| mol.neighbor_numbers(n))
                .filter(|n| balance.common.contains(n))
                .collect();
            if !skin.is_empty() {
                balance.skinned.extend(skin);
                balance.removed_groups.push(group);
            }
        }

        for mol in &self.products {
            let atoms: BTreeSet<AtomNumber> = numbers(mol)
                .intersection(&balance.added)
                .copied()
                .collect();
            if atoms.is_empty() {
                continue;
            }
            let added = substructure(mol, atoms)?;
            for fragment in get_fragments(&added) {
                let mapping = substruct_matches(
                    &common_products,
                    &fragment,
                    |t: &Atom, q: &Atom| t.matches(q),
                    |t: &Bond, q: &Bond| t.order == q.order,
                )
                .next();
                balance.added_groups.push(AddedGroup {
                    atoms: numbers(&fragment),
                    mapping,
                });
            }
        }

        debug!(
            "{} added, {} removed, {} removed groups, {} added groups",
            balance.added.len(),
            balance.removed.len(),
            balance.removed_groups.len(),
            balance.added_groups.len()
        );
        Ok(balance)
    }
}
