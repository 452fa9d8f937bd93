use std::collections::{BTreeMap, BTreeSet, VecDeque};

use petgraph::graph::NodeIndex;

use crate::mol::{AtomNumber, Mol, MolError};

/// Connected components as sorted atom-number lists.
///
/// Components are ordered by their smallest atom number, so the result does
/// not depend on arena order.
pub fn connected_components<A, B>(mol: &Mol<A, B>) -> Vec<Vec<AtomNumber>> {
    let n = mol.atom_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    for node in mol.atoms() {
        if visited[node.index()] {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if visited[current.index()] {
                continue;
            }
            visited[current.index()] = true;
            component.push(mol.number(current));
            for neighbor in mol.neighbors(current) {
                if !visited[neighbor.index()] {
                    stack.push(neighbor);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }
    components.sort_unstable_by_key(|c| c[0]);
    components
}

pub fn num_components<A, B>(mol: &Mol<A, B>) -> usize {
    connected_components(mol).len()
}

/// Whether any bond path joins two atoms. Unknown atoms are never connected.
pub fn has_path<A, B>(mol: &Mol<A, B>, from: AtomNumber, to: AtomNumber) -> bool {
    let (Some(from), Some(to)) = (mol.node(from), mol.node(to)) else {
        return false;
    };
    if from == to {
        return true;
    }
    let mut visited = vec![false; mol.atom_count()];
    visited[from.index()] = true;
    let mut queue = VecDeque::new();
    queue.push_back(from);
    while let Some(current) = queue.pop_front() {
        for neighbor in mol.neighbors(current) {
            if neighbor == to {
                return true;
            }
            if !visited[neighbor.index()] {
                visited[neighbor.index()] = true;
                queue.push_back(neighbor);
            }
        }
    }
    false
}

/// Induced subgraph over the given atom numbers. Metadata is not carried.
pub fn substructure<A: Clone, B: Clone>(
    mol: &Mol<A, B>,
    numbers: impl IntoIterator<Item = AtomNumber>,
) -> Result<Mol<A, B>, MolError> {
    let selected: BTreeSet<AtomNumber> = numbers.into_iter().collect();
    let mut sub = Mol::new();
    let mut index_map: BTreeMap<NodeIndex, NodeIndex> = BTreeMap::new();
    for &number in &selected {
        let old_idx = mol.node(number).ok_or(MolError::UnknownAtom(number))?;
        let new_idx = sub.add_atom_numbered(number, mol.atom(old_idx).clone())?;
        index_map.insert(old_idx, new_idx);
    }
    for edge in mol.bonds() {
        if let Some((a, b)) = mol.bond_endpoints(edge) {
            if let (Some(&na), Some(&nb)) = (index_map.get(&a), index_map.get(&b)) {
                sub.add_bond(na, nb, mol.bond(edge).clone());
            }
        }
    }
    Ok(sub)
}

/// Split a graph into one graph per connected component, keeping atom numbers.
pub fn get_fragments<A: Clone, B: Clone>(mol: &Mol<A, B>) -> Vec<Mol<A, B>> {
    connected_components(mol)
        .into_iter()
        .filter_map(|component| substructure(mol, component).ok())
        .collect()
}

/// Add every atom and bond of `guest` to `host`.
///
/// The two graphs must not share atom numbers; on collision `host` is left
/// untouched. Guest metadata is merged over the host's.
pub fn union_into<A: Clone, B: Clone>(
    host: &mut Mol<A, B>,
    guest: &Mol<A, B>,
) -> Result<(), MolError> {
    if let Some(shared) = guest.numbers().find(|&n| host.contains(n)) {
        return Err(MolError::Collision(shared));
    }
    compose_into(host, guest)
}

/// Disjoint union of two graphs into a new graph.
pub fn union<A: Clone, B: Clone>(a: &Mol<A, B>, b: &Mol<A, B>) -> Result<Mol<A, B>, MolError> {
    let mut host = a.clone();
    union_into(&mut host, b)?;
    Ok(host)
}

/// Overlay `guest` onto `host`: shared atom numbers denote the same atom.
///
/// Host atoms and bonds win over the guest's; guest atoms and bonds missing
/// from the host are added. Guest metadata is merged over the host's.
pub fn compose_into<A: Clone, B: Clone>(
    host: &mut Mol<A, B>,
    guest: &Mol<A, B>,
) -> Result<(), MolError> {
    for idx in guest.atoms() {
        let number = guest.number(idx);
        if !host.contains(number) {
            host.add_atom_numbered(number, guest.atom(idx).clone())?;
        }
    }
    for (a, b, bond) in guest.bond_list() {
        if host.bond_by_numbers(a, b).is_none() {
            host.connect(a, b, bond.clone())?;
        }
    }
    host.meta_mut()
        .extend(guest.meta().iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(())
}

/// Copy a graph under new atom numbers.
///
/// Atoms absent from `mapping` keep their number. Fails if two atoms would
/// end up with the same number.
pub fn relabel<A: Clone, B: Clone>(
    mol: &Mol<A, B>,
    mapping: &BTreeMap<AtomNumber, AtomNumber>,
) -> Result<Mol<A, B>, MolError> {
    let mut relabeled = Mol::new();
    let mut index_map = vec![NodeIndex::new(0); mol.atom_count()];
    for idx in mol.atoms() {
        let old = mol.number(idx);
        let new = mapping.get(&old).copied().unwrap_or(old);
        index_map[idx.index()] = relabeled.add_atom_numbered(new, mol.atom(idx).clone())?;
    }
    for edge in mol.bonds() {
        if let Some((a, b)) = mol.bond_endpoints(edge) {
            relabeled.add_bond(
                index_map[a.index()],
                index_map[b.index()],
                mol.bond(edge).clone(),
            );
        }
    }
    *relabeled.meta_mut() = mol.meta().clone();
    Ok(relabeled)
}
