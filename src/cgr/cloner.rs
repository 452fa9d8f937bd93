use log::debug;

use crate::bond::{BondOrder, DynBond};
use crate::graph_ops::{compose_into, relabel, substructure, union_into};
use crate::mol::MolError;
use crate::substruct::AtomMapping;

use super::error::CgrError;
use super::groups::Groups;
use super::matcher::GroupMatch;
use super::split::Split;
use super::Cgr;

/// Rename `group` so that it can be merged into `host`.
///
/// Atoms listed in `fixed` take their mapped number; every other atom gets a
/// fresh number above the host's largest, assigned in ascending order of the
/// original numbers. Returns the renamed graph and the full mapping used.
pub fn remap_group(
    group: &Cgr,
    host: &Cgr,
    fixed: &AtomMapping,
) -> Result<(Cgr, AtomMapping), MolError> {
    let mut mapping = fixed.clone();
    let mut next = host.max_number().map_or(1, |m| m + 1);
    let mut unmapped: Vec<_> = group.numbers().filter(|n| !fixed.contains_key(n)).collect();
    unmapped.sort_unstable();
    for number in unmapped {
        mapping.insert(number, next);
        next += 1;
    }
    let renamed = relabel(group, &mapping)?;
    Ok((renamed, mapping))
}

/// Rebuild one matched group on a copy of `working`.
///
/// The R-group is overlaid onto the residual component it matched, so atoms
/// the residual lacked are cloned in. Every leaving group paired with one of
/// the R-group's pivots is cloned under fresh numbers and bonded back to the
/// pivot's image with a breaking single bond. `working` is never modified;
/// on error the partial copy is dropped.
pub fn clone_group(
    working: &Cgr,
    split: &Split,
    groups: &Groups,
    found: &GroupMatch,
) -> Result<Cgr, CgrError> {
    let r_group = &groups.r_groups[found.r_group];
    let mut staged = working.clone();

    let r_graph = substructure(&split.graph, r_group.atoms.iter().copied())?;
    let (renamed, _) =
        remap_group(&r_graph, &staged, &found.mapping).map_err(CgrError::Collision)?;
    compose_into(&mut staged, &renamed).map_err(CgrError::Collision)?;

    for &(pivot, departed) in &split.lost_bonds {
        if !r_group.terminals.contains(&pivot) {
            continue;
        }
        let Some(x_atoms) = groups.x_groups.get(&departed) else {
            continue;
        };
        let anchor = found
            .mapping
            .get(&pivot)
            .copied()
            .ok_or(MolError::UnknownAtom(pivot))?;

        let x_graph = substructure(&split.graph, x_atoms.iter().copied())?;
        let (renamed_x, x_mapping) =
            remap_group(&x_graph, &staged, &AtomMapping::new()).map_err(CgrError::Collision)?;
        union_into(&mut staged, &renamed_x).map_err(CgrError::Collision)?;
        let leaving = x_mapping
            .get(&departed)
            .copied()
            .ok_or(MolError::UnknownAtom(departed))?;
        staged
            .connect(anchor, leaving, DynBond::broken(BondOrder::Single))
            .map_err(CgrError::Collision)?;
        debug!("cloned leaving group {departed} as {leaving} on atom {anchor}");
    }

    Ok(staged)
}
