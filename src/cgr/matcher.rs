use std::collections::BTreeSet;

use log::{debug, trace};

use crate::graph_ops::substructure;
use crate::mol::AtomNumber;
use crate::substruct::{substruct_matches, AtomMapping};

use super::error::CgrError;
use super::groups::{Groups, RGroup};
use super::options::MatchMode;
use super::split::Split;

/// A residual component recognized as a partial copy of an R-group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    /// Index into [`Groups::residual`].
    pub residual: usize,
    /// Index into [`Groups::r_groups`].
    pub r_group: usize,
    /// R-group atom to residual atom. Total on the residual component and
    /// defined on every pivot of the R-group.
    pub mapping: AtomMapping,
}

/// Whether a mapping sends every pivot of `r_group` onto a cut terminal atom.
pub fn is_anchored(
    mapping: &AtomMapping,
    r_group: &RGroup,
    terminal_atoms: &BTreeSet<AtomNumber>,
) -> bool {
    r_group
        .terminals
        .iter()
        .all(|t| mapping.get(t).is_some_and(|m| terminal_atoms.contains(m)))
}

/// Find, for each residual component, the first R-group it embeds into.
///
/// R-groups are tried in discovery order and mappings in enumeration order;
/// the first anchored mapping wins. Residual components without a match are
/// left out of the result.
pub fn match_groups(
    split: &Split,
    groups: &Groups,
    mode: MatchMode,
) -> Result<Vec<GroupMatch>, CgrError> {
    let r_graphs = groups
        .r_groups
        .iter()
        .map(|r| substructure(&split.graph, r.atoms.iter().copied()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut matches = Vec::new();
    for (ri, residual) in groups.residual.iter().enumerate() {
        let query = substructure(&split.graph, residual.iter().copied())?;
        let found = groups
            .r_groups
            .iter()
            .zip(&r_graphs)
            .enumerate()
            .find_map(|(gi, (r_group, target))| {
                substruct_matches(
                    target,
                    &query,
                    |t, q| mode.atoms_match(t, q),
                    |t, q| mode.bonds_match(t, q),
                )
                .map(|m| m.into_iter().map(|(q, t)| (t, q)).collect::<AtomMapping>())
                .inspect(|m| trace!("candidate mapping {m:?} for component {}", residual[0]))
                .find(|m| is_anchored(m, r_group, &split.terminal_atoms))
                .map(|mapping| GroupMatch {
                    residual: ri,
                    r_group: gi,
                    mapping,
                })
            });
        match found {
            Some(m) => {
                debug!(
                    "component {} matches R-group {} via {:?}",
                    residual[0], groups.r_groups[m.r_group].atoms[0], m.mapping
                );
                matches.push(m);
            }
            None => debug!("component {} has no R-group match", residual[0]),
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::DynAtom;
    use crate::bond::{BondOrder, DynBond};
    use crate::cgr::groups::classify_components;
    use crate::cgr::split::split_graph;
    use crate::cgr::Cgr;

    const S: BondOrder = BondOrder::Single;

    fn cgr(atoms: &[(AtomNumber, u8)], bonds: &[(AtomNumber, AtomNumber, DynBond)]) -> Cgr {
        let mut g = Cgr::new();
        for &(n, z) in atoms {
            g.add_atom_numbered(n, DynAtom::new(z)).unwrap();
        }
        for &(a, b, bond) in bonds {
            g.connect(a, b, bond).unwrap();
        }
        g
    }

    /// Ethyl bromide hydrolysis next to a carbon whose own substitution is
    /// only drawn on the product side.
    fn partial_substitution() -> Cgr {
        cgr(
            &[(1, 6), (2, 6), (3, 35), (5, 8), (6, 6), (7, 6), (9, 8), (10, 6)],
            &[
                (1, 2, DynBond::unchanged(S)),
                (2, 3, DynBond::broken(S)),
                (2, 5, DynBond::formed(S)),
                (5, 6, DynBond::unchanged(S)),
                (7, 9, DynBond::formed(S)),
                (9, 10, DynBond::unchanged(S)),
            ],
        )
    }

    #[test]
    fn terminal_atom_is_matched_to_pivot() {
        let split = split_graph(&partial_substitution());
        let groups = classify_components(&split, true).unwrap();
        assert_eq!(groups.residual, vec![vec![5, 6], vec![7], vec![9, 10]]);
        let matches = match_groups(&split, &groups, MatchMode::Pair).unwrap();
        assert_eq!(
            matches,
            vec![GroupMatch {
                residual: 1,
                r_group: 0,
                mapping: AtomMapping::from([(2, 7)]),
            }]
        );
    }

    #[test]
    fn unanchored_mapping_is_rejected() {
        // lone carbon 8 fits the ethyl group but was not exposed by a cut
        let mut g = partial_substitution();
        g.add_atom_numbered(8, DynAtom::new(6)).unwrap();
        let split = split_graph(&g);
        let groups = classify_components(&split, true).unwrap();
        assert!(groups.residual.contains(&vec![8]));
        let matches = match_groups(&split, &groups, MatchMode::Pair).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].mapping, AtomMapping::from([(2, 7)]));
    }

    #[test]
    fn first_discovered_r_group_wins() {
        // lone carbon 7 fits the pivot of both the ethyl group and the
        // methyl group at 20
        let mut g = partial_substitution();
        for (n, z) in [(20, 6), (21, 17), (22, 8)] {
            g.add_atom_numbered(n, DynAtom::new(z)).unwrap();
        }
        g.connect(20, 21, DynBond::broken(S)).unwrap();
        g.connect(20, 22, DynBond::formed(S)).unwrap();

        let split = split_graph(&g);
        let groups = classify_components(&split, true).unwrap();
        assert_eq!(groups.r_groups.len(), 2);
        assert_eq!(groups.r_groups[1].atoms, vec![20]);

        let matches = match_groups(&split, &groups, MatchMode::Pair).unwrap();
        assert_eq!(
            matches,
            vec![GroupMatch {
                residual: 1,
                r_group: 0,
                mapping: AtomMapping::from([(2, 7)]),
            }]
        );
    }

    #[test]
    fn anchoring_requires_every_pivot() {
        let r_group = RGroup {
            terminals: BTreeSet::from([2, 4]),
            atoms: vec![1, 2, 4],
        };
        let terminals = BTreeSet::from([7, 8]);
        assert!(is_anchored(&AtomMapping::from([(2, 7), (4, 8)]), &r_group, &terminals));
        assert!(!is_anchored(&AtomMapping::from([(2, 7)]), &r_group, &terminals));
        assert!(!is_anchored(&AtomMapping::from([(2, 7), (4, 9)]), &r_group, &terminals));
    }

    #[test]
    fn element_mismatch_gives_no_match() {
        let g = cgr(
            &[(1, 6), (2, 6), (3, 35), (4, 8)],
            &[
                (1, 2, DynBond::unchanged(S)),
                (2, 3, DynBond::broken(S)),
                (2, 4, DynBond::formed(S)),
            ],
        );
        let split = split_graph(&g);
        let groups = classify_components(&split, true).unwrap();
        assert!(match_groups(&split, &groups, MatchMode::Pair)
            .unwrap()
            .is_empty());
    }
}
