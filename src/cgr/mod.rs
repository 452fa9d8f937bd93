//! Condensed reaction graphs and substituent reconstruction.
//!
//! A condensed reaction graph (CGR) stores reactants and products of a
//! mapped reaction in one graph: every edge carries a [`DynBond`] pairing
//! the reactant and product bond orders. [`clone_subgraphs`] uses the bond
//! changes to find substituents that the product side only drew in part, and
//! clones the missing atoms, together with their leaving groups, from the
//! fully drawn copy elsewhere in the graph.

pub mod bond_change;
pub mod cloner;
pub mod compose;
pub mod error;
pub mod groups;
pub mod matcher;
pub mod options;
pub mod split;

pub use bond_change::{classify_bond, is_substitution_path, substitution_paths, BondChange};
pub use compose::{compose, decompose};
pub use error::CgrError;
pub use groups::{classify_components, Groups, RGroup};
pub use matcher::{match_groups, GroupMatch};
pub use options::{CloneOptions, MatchMode};
pub use split::{split_graph, Split};

use log::{debug, warn};

use crate::atom::DynAtom;
use crate::bond::DynBond;
use crate::mol::Mol;

/// Condensed reaction graph.
pub type Cgr = Mol<DynAtom, DynBond>;

/// Clone partially drawn substituents of a reaction graph with default options.
///
/// See [`clone_subgraphs_with`].
pub fn clone_subgraphs(g: &Cgr) -> Result<Cgr, CgrError> {
    clone_subgraphs_with(g, &CloneOptions::default())
}

/// Clone partially drawn substituents of a reaction graph.
///
/// The graph is cut at its reaction centers, the pieces are sorted into
/// leaving groups, substituents and the rest, and each remaining piece that
/// embeds into a substituent at its cut atoms gets the substituent's missing
/// atoms and leaving groups cloned onto it under fresh atom numbers.
///
/// Returns the enlarged graph with the input's metadata when anything was
/// cloned, and an independent copy of the input otherwise. Invalid edges and
/// ambiguous leaving groups abort the call; a group whose clone cannot be
/// merged is skipped.
pub fn clone_subgraphs_with(g: &Cgr, options: &CloneOptions) -> Result<Cgr, CgrError> {
    bond_change::validate(g)?;
    let split = split_graph(g);
    let groups = classify_components(&split, options.strict_roles)?;
    let found = match_groups(&split, &groups, options.match_mode)?;

    let mut working = g.clone();
    let mut cloned = 0usize;
    for m in &found {
        match cloner::clone_group(&working, &split, &groups, m) {
            Ok(staged) => {
                working = staged;
                cloned += 1;
            }
            Err(e) => warn!(
                "skipping clone of component {}: {e}",
                groups.residual[m.residual][0]
            ),
        }
    }

    if cloned == 0 {
        debug!("no substituents cloned");
        return Ok(g.clone());
    }
    debug!("cloned {cloned} substituents");
    working
        .meta_mut()
        .extend(g.meta().iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(working)
}

impl Mol<DynAtom, DynBond> {
    /// Method form of [`clone_subgraphs`].
    pub fn clone_subgraphs(&self) -> Result<Cgr, CgrError> {
        clone_subgraphs(self)
    }
}
