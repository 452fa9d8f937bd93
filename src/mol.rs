use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use thiserror::Error;

/// Stable identity of an atom, independent of its position in the graph arena.
pub type AtomNumber = usize;

/// Free-form annotations attached to a whole graph.
pub type Meta = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MolError {
    #[error("atom {0} already exists")]
    DuplicateAtom(AtomNumber),
    #[error("atom {0} not found")]
    UnknownAtom(AtomNumber),
    #[error("atoms {0} and {1} are already bonded")]
    DuplicateBond(AtomNumber, AtomNumber),
    #[error("atom {0} cannot be bonded to itself")]
    SelfBond(AtomNumber),
    #[error("atom number {0} is used by both graphs")]
    Collision(AtomNumber),
}

/// Molecular graph with numbered atoms.
///
/// Nodes live in a `petgraph` arena; each node also carries an atom number
/// that stays fixed for the lifetime of the graph and survives copies,
/// substructure extraction and unions. Reaction graphs built from the same
/// mapped reaction share atom numbers across reactants and products.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    numbers: Vec<AtomNumber>,
    nodes: HashMap<AtomNumber, NodeIndex>,
    next_number: AtomNumber,
    meta: Meta,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            numbers: Vec::new(),
            nodes: HashMap::new(),
            next_number: 1,
            meta: Meta::new(),
        }
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    /// Add an atom under the next free atom number.
    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        let number = self.next_number;
        self.insert_atom(number, atom)
    }

    /// Add an atom under an explicit atom number.
    pub fn add_atom_numbered(
        &mut self,
        number: AtomNumber,
        atom: A,
    ) -> Result<NodeIndex, MolError> {
        if self.nodes.contains_key(&number) {
            return Err(MolError::DuplicateAtom(number));
        }
        Ok(self.insert_atom(number, atom))
    }

    fn insert_atom(&mut self, number: AtomNumber, atom: A) -> NodeIndex {
        let idx = self.graph.add_node(atom);
        self.numbers.push(number);
        self.nodes.insert(number, idx);
        self.next_number = self.next_number.max(number + 1);
        idx
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    /// Bond two atoms given by number.
    pub fn connect(
        &mut self,
        a: AtomNumber,
        b: AtomNumber,
        bond: B,
    ) -> Result<EdgeIndex, MolError> {
        if a == b {
            return Err(MolError::SelfBond(a));
        }
        let na = self.node(a).ok_or(MolError::UnknownAtom(a))?;
        let nb = self.node(b).ok_or(MolError::UnknownAtom(b))?;
        if self.graph.find_edge(na, nb).is_some() {
            return Err(MolError::DuplicateBond(a, b));
        }
        Ok(self.graph.add_edge(na, nb, bond))
    }

    /// Remove the bond between two atoms, returning its value.
    ///
    /// Removing a bond never renumbers atoms; edge indices may shift.
    pub fn remove_bond(&mut self, a: AtomNumber, b: AtomNumber) -> Option<B> {
        let edge = self.graph.find_edge(self.node(a)?, self.node(b)?)?;
        self.graph.remove_edge(edge)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    pub fn number(&self, idx: NodeIndex) -> AtomNumber {
        self.numbers[idx.index()]
    }

    pub fn node(&self, number: AtomNumber) -> Option<NodeIndex> {
        self.nodes.get(&number).copied()
    }

    pub fn contains(&self, number: AtomNumber) -> bool {
        self.nodes.contains_key(&number)
    }

    /// Atom numbers in arena order.
    pub fn numbers(&self) -> impl Iterator<Item = AtomNumber> + '_ {
        self.numbers.iter().copied()
    }

    pub fn max_number(&self) -> Option<AtomNumber> {
        self.numbers.iter().copied().max()
    }

    pub fn atom_by_number(&self, number: AtomNumber) -> Option<&A> {
        self.node(number).map(|idx| &self.graph[idx])
    }

    pub fn bond_by_numbers(&self, a: AtomNumber, b: AtomNumber) -> Option<&B> {
        let edge = self.graph.find_edge(self.node(a)?, self.node(b)?)?;
        Some(&self.graph[edge])
    }

    pub fn neighbor_numbers(&self, number: AtomNumber) -> Vec<AtomNumber> {
        match self.node(number) {
            Some(idx) => self.neighbors(idx).map(|n| self.number(n)).collect(),
            None => Vec::new(),
        }
    }

    /// Every bond as `(lower number, higher number, value)`.
    pub fn bond_list(&self) -> impl Iterator<Item = (AtomNumber, AtomNumber, &B)> + '_ {
        self.graph.edge_references().map(|e| {
            let (a, b) = (self.number(e.source()), self.number(e.target()));
            (a.min(b), a.max(b), e.weight())
        })
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            numbers: self.numbers.clone(),
            nodes: self.nodes.clone(),
            next_number: self.next_number,
            meta: self.meta.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity-based equality: same atom numbers with equal atoms, same bonded
/// number pairs with equal bonds, and equal metadata. Arena order is ignored.
impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        for idx in self.atoms() {
            match other.atom_by_number(self.number(idx)) {
                Some(atom) if atom == self.atom(idx) => {}
                _ => return false,
            }
        }
        for (a, b, bond) in self.bond_list() {
            if other.bond_by_numbers(a, b) != Some(bond) {
                return false;
            }
        }
        self.meta == other.meta
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut numbers: Vec<AtomNumber> = self.numbers().collect();
        numbers.sort_unstable();
        let mut bonds: Vec<(AtomNumber, AtomNumber)> =
            self.bond_list().map(|(a, b, _)| (a, b)).collect();
        bonds.sort_unstable();
        f.debug_struct("Mol")
            .field("atoms", &numbers)
            .field("bonds", &bonds)
            .field("meta", &self.meta)
            .finish()
    }
}
