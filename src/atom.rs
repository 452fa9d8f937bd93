use serde::{Deserialize, Serialize};

/// Atom of a plain (single-state) molecular graph.
///
/// `Atom` stores the intrinsic properties read off a structural formula.
/// The atom's identity is not part of the value: it is the atom number the
/// owning [`Mol`](crate::Mol) assigns to the node.
///
/// # Examples
///
/// ```
/// use cgrcrab::Atom;
///
/// let bromide = Atom::new(35).with_charge(-1);
/// assert_eq!(bromide.atomic_num, 35);
/// assert_eq!(bromide.formal_charge, -1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of implicit hydrogens.
    pub hydrogen_count: u8,
    /// Whether this atom is in an aromatic ring.
    pub is_aromatic: bool,
}

impl Atom {
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    pub fn with_isotope(mut self, isotope: u16) -> Self {
        self.isotope = isotope;
        self
    }

    /// Compatibility used when matching plain molecules against each other.
    ///
    /// Hydrogen counts are ignored: they change whenever a substituent is
    /// attached or detached.
    pub fn matches(&self, other: &Atom) -> bool {
        self.atomic_num == other.atomic_num
            && self.formal_charge == other.formal_charge
            && self.isotope == other.isotope
    }
}

/// Atom of a condensed reaction graph.
///
/// Element and isotope are invariant through a reaction; the formal charge is
/// kept for both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DynAtom {
    pub atomic_num: u8,
    pub isotope: u16,
    /// Charge in the reactants.
    pub charge: i8,
    /// Charge in the products.
    pub p_charge: i8,
}

impl DynAtom {
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    pub fn with_charges(mut self, charge: i8, p_charge: i8) -> Self {
        self.charge = charge;
        self.p_charge = p_charge;
        self
    }

    /// Build a reaction atom from its reactant and product states.
    ///
    /// An atom present on one side only keeps that side's charge on both.
    pub fn from_states(reactant: Option<&Atom>, product: Option<&Atom>) -> Option<Self> {
        let base = reactant.or(product)?;
        Some(Self {
            atomic_num: base.atomic_num,
            isotope: base.isotope,
            charge: reactant.map_or(base.formal_charge, |a| a.formal_charge),
            p_charge: product.map_or(base.formal_charge, |a| a.formal_charge),
        })
    }

    pub fn reactant_atom(&self) -> Atom {
        Atom::new(self.atomic_num)
            .with_charge(self.charge)
            .with_isotope(self.isotope)
    }

    pub fn product_atom(&self) -> Atom {
        Atom::new(self.atomic_num)
            .with_charge(self.p_charge)
            .with_isotope(self.isotope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignores_hydrogens() {
        let mut a = Atom::new(8);
        let b = Atom::new(8);
        a.hydrogen_count = 1;
        assert!(a.matches(&b));
        assert!(!a.matches(&Atom::new(8).with_charge(-1)));
    }

    #[test]
    fn dyn_atom_from_both_states() {
        let r = Atom::new(8).with_charge(-1);
        let p = Atom::new(8);
        let d = DynAtom::from_states(Some(&r), Some(&p)).unwrap();
        assert_eq!(d.charge, -1);
        assert_eq!(d.p_charge, 0);
        assert_eq!(d.reactant_atom(), r);
        assert_eq!(d.product_atom(), p);
    }

    #[test]
    fn dyn_atom_from_one_side() {
        let p = Atom::new(17).with_charge(-1);
        let d = DynAtom::from_states(None, Some(&p)).unwrap();
        assert_eq!((d.charge, d.p_charge), (-1, -1));
        assert!(DynAtom::from_states(None, None).is_none());
    }
}
