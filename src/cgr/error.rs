use thiserror::Error;

use crate::mol::{AtomNumber, MolError};

/// Error conditions raised while reconciling a condensed reaction graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CgrError {
    /// An edge carries no bond on either side, so the graph is not a valid
    /// condensed reaction graph.
    #[error("bond {0}-{1} is absent in both reactants and products")]
    InvalidInput(AtomNumber, AtomNumber),

    /// An atom changes element or isotope between reactants and products.
    #[error("atom {0} has different elements in reactants and products")]
    ElementMismatch(AtomNumber),

    /// One component holds the departed ends of several lost bonds.
    #[error("component containing atom {first} holds several leaving-group terminals: {terminals:?}")]
    AmbiguousGroup {
        first: AtomNumber,
        terminals: Vec<AtomNumber>,
    },

    /// One component is both a leaving group and a substituent.
    #[error("component containing atom {first} is both a leaving group and a substituent")]
    AmbiguousRole { first: AtomNumber },

    /// Renaming a cloned group still produced an atom number already in use.
    #[error("cloned group collides with the working graph: {0}")]
    Collision(#[source] MolError),

    #[error(transparent)]
    Mol(#[from] MolError),
}
