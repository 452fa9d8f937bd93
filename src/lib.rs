pub mod atom;
pub mod bond;
pub mod cgr;
pub mod graph_ops;
pub mod mol;
pub mod reaction;
pub mod substruct;

pub use atom::{Atom, DynAtom};
pub use bond::{Bond, BondOrder, DynBond};
pub use cgr::{
    clone_subgraphs, clone_subgraphs_with, compose, decompose, BondChange, Cgr, CgrError,
    CloneOptions, MatchMode,
};
pub use mol::{AtomNumber, Meta, Mol, MolError};
pub use reaction::{AddedGroup, ReactionContainer, ReactionError, SubstituentBalance};
pub use substruct::{substruct_matches, AtomMapping};
