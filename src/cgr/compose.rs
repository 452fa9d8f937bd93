use std::collections::BTreeSet;

use crate::atom::{Atom, DynAtom};
use crate::bond::{Bond, DynBond};
use crate::graph_ops::union_into;
use crate::mol::{AtomNumber, Mol, MolError};

use super::error::CgrError;
use super::Cgr;

fn merge_side(mols: &[Mol<Atom, Bond>]) -> Result<Mol<Atom, Bond>, MolError> {
    let mut merged = Mol::new();
    for mol in mols {
        union_into(&mut merged, mol)?;
    }
    Ok(merged)
}

/// Condense numbered reactant and product molecules into one reaction graph.
///
/// Atoms are matched by atom number. Each edge gets the reactant bond order
/// and the product bond order of the same atom pair; an atom present on one
/// side only keeps that side's properties. Metadata of all molecules is
/// merged, products last.
pub fn compose(
    reactants: &[Mol<Atom, Bond>],
    products: &[Mol<Atom, Bond>],
) -> Result<Cgr, CgrError> {
    let r = merge_side(reactants)?;
    let p = merge_side(products)?;

    let numbers: BTreeSet<AtomNumber> = r.numbers().chain(p.numbers()).collect();
    let mut cgr = Cgr::new();
    for &n in &numbers {
        let (ra, pa) = (r.atom_by_number(n), p.atom_by_number(n));
        if let (Some(ra), Some(pa)) = (ra, pa) {
            if ra.atomic_num != pa.atomic_num || ra.isotope != pa.isotope {
                return Err(CgrError::ElementMismatch(n));
            }
        }
        let atom = DynAtom::from_states(ra, pa).ok_or(MolError::UnknownAtom(n))?;
        cgr.add_atom_numbered(n, atom)?;
    }

    let pairs: BTreeSet<(AtomNumber, AtomNumber)> = r
        .bond_list()
        .chain(p.bond_list())
        .map(|(a, b, _)| (a, b))
        .collect();
    for (a, b) in pairs {
        let bond = DynBond::new(
            r.bond_by_numbers(a, b).map(|x| x.order),
            p.bond_by_numbers(a, b).map(|x| x.order),
        );
        cgr.connect(a, b, bond)?;
    }

    cgr.meta_mut().extend(r.meta().clone());
    cgr.meta_mut().extend(p.meta().clone());
    Ok(cgr)
}

/// Split a reaction graph back into its reactant and product states.
///
/// Both sides carry every atom; atoms not bonded on a side stay there as
/// isolated atoms. Hydrogen counts are not tracked and come back as zero.
pub fn decompose(cgr: &Cgr) -> Result<(Mol<Atom, Bond>, Mol<Atom, Bond>), MolError> {
    let mut reactant = Mol::new();
    let mut product = Mol::new();
    for idx in cgr.atoms() {
        let atom = cgr.atom(idx);
        let n = cgr.number(idx);
        reactant.add_atom_numbered(n, atom.reactant_atom())?;
        product.add_atom_numbered(n, atom.product_atom())?;
    }
    for (a, b, bond) in cgr.bond_list() {
        if let Some(order) = bond.reactant {
            reactant.connect(a, b, Bond::new(order))?;
        }
        if let Some(order) = bond.product {
            product.connect(a, b, Bond::new(order))?;
        }
    }
    *reactant.meta_mut() = cgr.meta().clone();
    *product.meta_mut() = cgr.meta().clone();
    Ok((reactant, product))
}
