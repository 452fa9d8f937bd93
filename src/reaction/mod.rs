mod balance;
pub mod error;

pub use balance::{AddedGroup, SubstituentBalance};
pub use error::ReactionError;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::cgr::{compose, Cgr};
use crate::mol::{Meta, Mol};

/// Mapped reaction: numbered reactant and product molecules.
///
/// Atom numbers identify the same atom on both sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionContainer {
    pub reactants: Vec<Mol<Atom, Bond>>,
    pub products: Vec<Mol<Atom, Bond>>,
    pub meta: Meta,
}

impl ReactionContainer {
    pub fn new(reactants: Vec<Mol<Atom, Bond>>, products: Vec<Mol<Atom, Bond>>) -> Self {
        Self {
            reactants,
            products,
            meta: Meta::new(),
        }
    }

    /// Condense the reaction into one graph; the container's metadata is
    /// merged over the molecules'.
    pub fn compose(&self) -> Result<Cgr, ReactionError> {
        let mut cgr = compose(&self.reactants, &self.products)?;
        cgr.meta_mut()
            .extend(self.meta.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(cgr)
    }
}
