//! Molecule perception from the bond graph.
//!
//! Bonds are treated as undirected edges. A disjoint-set forest merges
//! bonded particles, then each component receives a label in order of its
//! lowest particle index. Unbonded particles form singleton molecules.

use super::error::Error;
use crate::model::frame::{Bond, Frame};

/// One molecule label per particle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeLabels {
    labels: Vec<usize>,
    molecule_count: usize,
}

impl MoleculeLabels {
    /// Labels the particles of a frame from its own bond list.
    pub fn from_frame(frame: &Frame) -> Result<Self, Error> {
        label(frame.particle_count(), &frame.bonds)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<usize> {
        self.labels.get(idx).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.labels
    }

    /// Number of labeled particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn molecule_count(&self) -> usize {
        self.molecule_count
    }

    /// Returns `true` if both particles exist and are transitively bonded.
    pub fn same_molecule(&self, i: usize, j: usize) -> bool {
        match (self.get(i), self.get(j)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Particle count of each molecule, indexed by label.
    pub fn molecule_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.molecule_count];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Partitions `point_count` particles into bonded molecules.
///
/// # Errors
///
/// Returns [`Error::InvalidTopology`] if any bond references an index
/// `>= point_count`.
pub fn label(point_count: usize, bonds: &[Bond]) -> Result<MoleculeLabels, Error> {
    let mut forest = DisjointSet::new(point_count);

    for bond in bonds {
        if bond.i >= point_count || bond.j >= point_count {
            return Err(Error::invalid_topology(bond.i, bond.j, point_count));
        }
        forest.union(bond.i, bond.j);
    }

    const UNASSIGNED: usize = usize::MAX;
    let mut root_labels = vec![UNASSIGNED; point_count];
    let mut labels = Vec::with_capacity(point_count);
    let mut molecule_count = 0;

    for idx in 0..point_count {
        let root = forest.find(idx);
        if root_labels[root] == UNASSIGNED {
            root_labels[root] = molecule_count;
            molecule_count += 1;
        }
        labels.push(root_labels[root]);
    }

    Ok(MoleculeLabels {
        labels,
        molecule_count,
    })
}

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, i: usize, j: usize) {
        let ri = self.find(i);
        let rj = self.find(j);
        if ri == rj {
            return;
        }
        match self.rank[ri].cmp(&self.rank[rj]) {
            std::cmp::Ordering::Less => self.parent[ri] = rj,
            std::cmp::Ordering::Greater => self.parent[rj] = ri,
            std::cmp::Ordering::Equal => {
                self.parent[rj] = ri;
                self.rank[ri] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sim_box::SimBox;

    fn bonds(pairs: &[(usize, usize)]) -> Vec<Bond> {
        pairs.iter().map(|&p| Bond::from(p)).collect()
    }

    /// Two labelings describe the same partition.
    fn same_partition(a: &MoleculeLabels, b: &MoleculeLabels) -> bool {
        if a.len() != b.len() {
            return false;
        }
        (0..a.len()).all(|i| (0..a.len()).all(|j| a.same_molecule(i, j) == b.same_molecule(i, j)))
    }

    #[test]
    fn no_bonds_gives_distinct_labels() {
        let labels = label(5, &[]).unwrap();
        assert_eq!(labels.as_slice(), &[0, 1, 2, 3, 4]);
        assert_eq!(labels.molecule_count(), 5);
    }

    #[test]
    fn empty_point_set() {
        let labels = label(0, &[]).unwrap();
        assert!(labels.is_empty());
        assert_eq!(labels.molecule_count(), 0);
    }

    #[test]
    fn fully_connected_gives_single_label() {
        let labels = label(4, &bonds(&[(0, 1), (1, 2), (2, 3)])).unwrap();
        assert_eq!(labels.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(labels.molecule_count(), 1);
    }

    #[test]
    fn chain_plus_isolated_particle() {
        let labels = label(4, &bonds(&[(0, 1), (1, 2)])).unwrap();
        assert!(labels.same_molecule(0, 2));
        assert!(!labels.same_molecule(0, 3));
        assert_eq!(labels.molecule_sizes(), vec![3, 1]);
    }

    #[test]
    fn labels_follow_lowest_index() {
        let labels = label(5, &bonds(&[(3, 4), (1, 4), (0, 2)])).unwrap();
        assert_eq!(labels.as_slice(), &[0, 1, 0, 1, 1]);
    }

    #[test]
    fn partition_is_invariant_under_edge_order() {
        let edges = [(5, 6), (0, 1), (2, 3), (1, 3), (7, 8), (6, 8)];
        let forward = label(10, &bonds(&edges)).unwrap();

        let mut reversed: Vec<_> = edges.iter().map(|&(i, j)| (j, i)).collect();
        reversed.reverse();
        let backward = label(10, &bonds(&reversed)).unwrap();

        assert!(same_partition(&forward, &backward));
        assert_eq!(forward.molecule_count(), 4);
    }

    #[test]
    fn duplicate_and_self_bonds_are_harmless() {
        let labels = label(3, &bonds(&[(0, 1), (1, 0), (2, 2)])).unwrap();
        assert_eq!(labels.molecule_count(), 2);
        assert!(labels.same_molecule(0, 1));
    }

    #[test]
    fn out_of_range_bond_is_rejected() {
        let err = label(3, &bonds(&[(0, 1), (2, 3)])).unwrap_err();
        match err {
            Error::InvalidTopology { i, j, point_count } => {
                assert_eq!((i, j, point_count), (2, 3, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_molecule_out_of_range_is_false() {
        let labels = label(2, &bonds(&[(0, 1)])).unwrap();
        assert!(!labels.same_molecule(0, 5));
    }

    #[test]
    fn from_frame_uses_frame_bonds() {
        let mut frame = Frame::new(SimBox::cube(10.0));
        for k in 0..3 {
            frame.add_particle("X", [k as f64, 0.0, 0.0]);
        }
        frame.add_bond(2, 0);
        let labels = MoleculeLabels::from_frame(&frame).unwrap();
        assert_eq!(labels.as_slice(), &[0, 1, 0]);
    }
}
