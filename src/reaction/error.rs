use thiserror::Error;

use crate::cgr::CgrError;
use crate::mol::MolError;

/// Error returned by operations on a [`ReactionContainer`](super::ReactionContainer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionError {
    /// Two molecules on the same side share an atom number.
    #[error("{section} share atom numbers: {source}")]
    OverlappingMolecules {
        section: &'static str,
        #[source]
        source: MolError,
    },

    #[error(transparent)]
    Mol(#[from] MolError),

    #[error(transparent)]
    Cgr(#[from] CgrError),
}
