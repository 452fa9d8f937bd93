use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};

use crate::mol::AtomNumber;

use super::error::CgrError;
use super::split::Split;

/// Substituent component holding at least one pivot atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RGroup {
    /// Pivot atoms inside the component.
    pub terminals: BTreeSet<AtomNumber>,
    pub atoms: Vec<AtomNumber>,
}

/// Components of a [`Split`] sorted by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    /// Leaving groups keyed by their departed atom.
    pub x_groups: BTreeMap<AtomNumber, Vec<AtomNumber>>,
    /// Substituents in discovery order.
    pub r_groups: Vec<RGroup>,
    /// Everything else: candidates for cloning.
    pub residual: Vec<Vec<AtomNumber>>,
}

/// Sort split components into leaving groups, substituents and the rest.
///
/// A component touching a departed atom is a leaving group; otherwise one
/// touching a pivot is a substituent. A component touching several departed
/// atoms is rejected. One touching both roles is rejected when
/// `strict_roles` is set and treated as a leaving group otherwise.
pub fn classify_components(split: &Split, strict_roles: bool) -> Result<Groups, CgrError> {
    let x_terminals = split.x_terminals();
    let r_terminals = split.r_terminals();
    let mut groups = Groups::default();

    for component in &split.components {
        let xs: Vec<AtomNumber> = component
            .iter()
            .copied()
            .filter(|n| x_terminals.contains(n))
            .collect();
        let rs: BTreeSet<AtomNumber> = component
            .iter()
            .copied()
            .filter(|n| r_terminals.contains(n))
            .collect();

        match xs.as_slice() {
            [] if rs.is_empty() => groups.residual.push(component.clone()),
            [] => groups.r_groups.push(RGroup {
                terminals: rs,
                atoms: component.clone(),
            }),
            [departed] => {
                if !rs.is_empty() {
                    if strict_roles {
                        return Err(CgrError::AmbiguousRole {
                            first: component[0],
                        });
                    }
                    warn!(
                        "component with atom {} is both leaving group and substituent; keeping it as leaving group",
                        component[0]
                    );
                }
                groups.x_groups.insert(*departed, component.clone());
            }
            _ => {
                return Err(CgrError::AmbiguousGroup {
                    first: component[0],
                    terminals: xs,
                })
            }
        }
    }

    debug!(
        "{} leaving groups, {} substituents, {} residual components",
        groups.x_groups.len(),
        groups.r_groups.len(),
        groups.residual.len()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::DynAtom;
    use crate::bond::{BondOrder, DynBond};
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

    #[test]
    fn roles_of_simple_substitution() {
        let g = cgr(
            &[(1, 6), (2, 6), (3, 35), (5, 8), (6, 6)],
            &[
                (1, 2, DynBond::unchanged(S)),
                (2, 3, DynBond::broken(S)),
                (2, 5, DynBond::formed(S)),
                (5, 6, DynBond::unchanged(S)),
            ],
        );
        let groups = classify_components(&split_graph(&g), true).unwrap();
        assert_eq!(groups.x_groups, BTreeMap::from([(3, vec![3])]));
        assert_eq!(
            groups.r_groups,
            vec![RGroup {
                terminals: BTreeSet::from([2]),
                atoms: vec![1, 2],
            }]
        );
        assert_eq!(groups.residual, vec![vec![5, 6]]);
    }

    #[test]
    fn no_lost_bonds_means_everything_is_residual() {
        let g = cgr(&[(1, 6), (2, 8)], &[(1, 2, DynBond::unchanged(S))]);
        let groups = classify_components(&split_graph(&g), true).unwrap();
        assert!(groups.x_groups.is_empty());
        assert!(groups.r_groups.is_empty());
        assert_eq!(groups.residual, vec![vec![1, 2]]);
    }

    #[test]
    fn several_departed_atoms_in_one_component() {
        // a peroxide bridge leaves two pivots at once
        let g = cgr(
            &[(1, 6), (2, 6), (3, 8), (4, 7), (5, 7), (9, 8)],
            &[
                (1, 3, DynBond::broken(S)),
                (1, 4, DynBond::formed(S)),
                (2, 9, DynBond::broken(S)),
                (2, 5, DynBond::formed(S)),
                (3, 9, DynBond::unchanged(S)),
            ],
        );
        let err = classify_components(&split_graph(&g), true).unwrap_err();
        assert_eq!(
            err,
            CgrError::AmbiguousGroup {
                first: 3,
                terminals: vec![3, 9],
            }
        );
    }

    #[test]
    fn leaving_group_that_is_also_a_substituent() {
        // 1-3 breaks while both ends gain a new partner
        let g = cgr(
            &[(1, 6), (3, 6), (4, 8), (6, 17), (7, 7)],
            &[
                (1, 3, DynBond::broken(S)),
                (1, 4, DynBond::formed(S)),
                (3, 6, DynBond::broken(S)),
                (3, 7, DynBond::formed(S)),
            ],
        );
        let split = split_graph(&g);
        let err = classify_components(&split, true).unwrap_err();
        assert_eq!(err, CgrError::AmbiguousRole { first: 1 });

        let groups = classify_components(&split, false).unwrap();
        assert_eq!(groups.x_groups.keys().copied().collect::<Vec<_>>(), vec![1, 3, 6]);
        assert!(groups.r_groups.is_empty());
        assert_eq!(groups.residual, vec![vec![4], vec![7]]);
    }
}
