use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use crate::mol::{AtomNumber, Mol};

/// Query atom number to target atom number.
pub type AtomMapping = BTreeMap<AtomNumber, AtomNumber>;

/// Lazily enumerate every induced subgraph isomorphism of `query` into `target`.
///
/// `atom_match(target_atom, query_atom)` and `bond_match(target_bond,
/// query_bond)` decide compatibility. Each yielded mapping is total on the
/// query. Mappings come out in a fixed order: query atoms are assigned by
/// descending degree and candidates are tried in ascending target arena order.
///
/// An empty query yields exactly one empty mapping.
pub fn substruct_matches<'a, A1, B1, A2, B2, FA, FB>(
    target: &'a Mol<A1, B1>,
    query: &'a Mol<A2, B2>,
    atom_match: FA,
    bond_match: FB,
) -> SubstructMatches<'a, A1, B1, A2, B2, FA, FB>
where
    FA: Fn(&A1, &A2) -> bool,
    FB: Fn(&B1, &B2) -> bool,
{
    SubstructMatches::new(target, query, atom_match, bond_match)
}

pub struct SubstructMatches<'a, A1, B1, A2, B2, FA, FB> {
    target: &'a Mol<A1, B1>,
    query: &'a Mol<A2, B2>,
    atom_match: FA,
    bond_match: FB,
    query_order: Vec<NodeIndex>,
    query_map: Vec<Option<NodeIndex>>,
    target_used: Vec<bool>,
    // next target candidate to try at each search depth
    cursors: Vec<usize>,
    done: bool,
}

impl<'a, A1, B1, A2, B2, FA, FB> SubstructMatches<'a, A1, B1, A2, B2, FA, FB>
where
    FA: Fn(&A1, &A2) -> bool,
    FB: Fn(&B1, &B2) -> bool,
{
    fn new(
        target: &'a Mol<A1, B1>,
        query: &'a Mol<A2, B2>,
        atom_match: FA,
        bond_match: FB,
    ) -> Self {
        let mut query_order: Vec<NodeIndex> = query.atoms().collect();
        query_order.sort_by(|&a, &b| {
            query.neighbors(b).count().cmp(&query.neighbors(a).count())
        });
        Self {
            target,
            query,
            atom_match,
            bond_match,
            query_order,
            query_map: vec![None; query.atom_count()],
            target_used: vec![false; target.atom_count()],
            cursors: vec![0],
            done: false,
        }
    }

    fn current_mapping(&self) -> AtomMapping {
        self.query_order
            .iter()
            .filter_map(|&qn| {
                self.query_map[qn.index()]
                    .map(|tn| (self.query.number(qn), self.target.number(tn)))
            })
            .collect()
    }

    fn is_feasible(&self, query_node: NodeIndex, target_node: NodeIndex) -> bool {
        if !(self.atom_match)(self.target.atom(target_node), self.query.atom(query_node)) {
            return false;
        }

        for (q_idx, mapped) in self.query_map.iter().enumerate() {
            let Some(t_mapped) = *mapped else {
                continue;
            };
            let q_other = NodeIndex::new(q_idx);
            let q_bond = self.query.bond_between(query_node, q_other);
            let t_bond = self.target.bond_between(target_node, t_mapped);
            match (q_bond, t_bond) {
                (Some(q_bond), Some(t_bond)) => {
                    if !(self.bond_match)(self.target.bond(t_bond), self.query.bond(q_bond)) {
                        return false;
                    }
                }
                (None, None) => {}
                // induced: bonds must agree in both directions
                _ => return false,
            }
        }

        true
    }
}

impl<A1, B1, A2, B2, FA, FB> Iterator for SubstructMatches<'_, A1, B1, A2, B2, FA, FB>
where
    FA: Fn(&A1, &A2) -> bool,
    FB: Fn(&B1, &B2) -> bool,
{
    type Item = AtomMapping;

    fn next(&mut self) -> Option<AtomMapping> {
        if self.done {
            return None;
        }
        if self.query_order.is_empty() {
            self.done = true;
            return Some(AtomMapping::new());
        }

        loop {
            let depth = self.cursors.len() - 1;
            let query_node = self.query_order[depth];

            if let Some(prev) = self.query_map[query_node.index()].take() {
                self.target_used[prev.index()] = false;
            }

            let found = (self.cursors[depth]..self.target_used.len()).find(|&t_idx| {
                !self.target_used[t_idx] && self.is_feasible(query_node, NodeIndex::new(t_idx))
            });

            match found {
                Some(t_idx) => {
                    self.cursors[depth] = t_idx + 1;
                    self.query_map[query_node.index()] = Some(NodeIndex::new(t_idx));
                    self.target_used[t_idx] = true;
                    if depth + 1 == self.query_order.len() {
                        return Some(self.current_mapping());
                    }
                    self.cursors.push(0);
                }
                None => {
                    self.cursors.pop();
                    if self.cursors.is_empty() {
                        self.done = true;
                        return None;
                    }
                }
            }
        }
    }
}
