use super::sim_box::SimBox;

/// Unordered bond between two particle indices, stored with `i <= j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }
}

impl From<(usize, usize)> for Bond {
    fn from((i, j): (usize, usize)) -> Self {
        Self::new(i, j)
    }
}

/// One trajectory snapshot.
///
/// Particle `k` has position `positions[k]` and type `type_names[type_ids[k]]`.
/// Bonds are read from the first frame of a trajectory only; later frames
/// may leave them empty.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sim_box: SimBox,
    pub positions: Vec<[f64; 3]>,
    pub type_ids: Vec<usize>,
    pub type_names: Vec<String>,
    pub bonds: Vec<Bond>,
}

impl Frame {
    pub fn new(sim_box: SimBox) -> Self {
        Self {
            sim_box,
            positions: Vec::new(),
            type_ids: Vec::new(),
            type_names: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Appends a particle, registering `type_name` if it has not been seen yet.
    ///
    /// Returns the index of the new particle.
    pub fn add_particle(&mut self, type_name: &str, position: [f64; 3]) -> usize {
        let type_id = match self.type_id(type_name) {
            Some(id) => id,
            None => {
                self.type_names.push(type_name.to_string());
                self.type_names.len() - 1
            }
        };
        self.positions.push(position);
        self.type_ids.push(type_id);
        self.positions.len() - 1
    }

    pub fn add_bond(&mut self, i: usize, j: usize) {
        self.bonds.push(Bond::new(i, j));
    }

    pub fn type_id(&self, type_name: &str) -> Option<usize> {
        self.type_names.iter().position(|name| name == type_name)
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Copies the same particles into a new frame with moved positions.
    pub fn with_positions(&self, positions: Vec<[f64; 3]>) -> Self {
        Self {
            sim_box: self.sim_box,
            positions,
            type_ids: self.type_ids.clone(),
            type_names: self.type_names.clone(),
            bonds: Vec::new(),
        }
    }
}

/// Boolean mask choosing a subset of particles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    mask: Vec<bool>,
}

impl Selection {
    pub fn from_mask(mask: Vec<bool>) -> Self {
        Self { mask }
    }

    /// Selects every one of `particle_count` particles.
    pub fn all(particle_count: usize) -> Self {
        Self {
            mask: vec![true; particle_count],
        }
    }

    /// Selects the particles of a named type. Unknown names select nothing.
    pub fn of_type(frame: &Frame, type_name: &str) -> Self {
        Self::of_types(frame, &[type_name])
    }

    /// Selects the particles whose type is any of `type_names`.
    pub fn of_types(frame: &Frame, type_names: &[&str]) -> Self {
        let ids: Vec<usize> = type_names
            .iter()
            .filter_map(|name| frame.type_id(name))
            .collect();
        Self {
            mask: frame.type_ids.iter().map(|t| ids.contains(t)).collect(),
        }
    }

    /// Length of the mask, which must equal the particle count of each frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.mask.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    /// Number of selected particles.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.mask.get(idx).copied().unwrap_or(false)
    }

    /// Global indices of the selected particles in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(idx, &m)| m.then_some(idx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_frame() -> Frame {
        let mut frame = Frame::new(SimBox::cube(10.0));
        frame.add_particle("A", [0.0, 0.0, 0.0]);
        frame.add_particle("B", [1.0, 0.0, 0.0]);
        frame.add_particle("A", [2.0, 0.0, 0.0]);
        frame.add_particle("C", [3.0, 0.0, 0.0]);
        frame
    }

    #[test]
    fn bond_is_normalized() {
        let b = Bond::new(5, 2);
        assert_eq!((b.i, b.j), (2, 5));
        assert_eq!(Bond::from((2, 5)), b);
    }

    #[test]
    fn add_particle_interns_types() {
        let frame = mixed_frame();
        assert_eq!(frame.particle_count(), 4);
        assert_eq!(frame.type_names, vec!["A", "B", "C"]);
        assert_eq!(frame.type_ids, vec![0, 1, 0, 2]);
        assert_eq!(frame.type_id("C"), Some(2));
        assert_eq!(frame.type_id("Z"), None);
    }

    #[test]
    fn selection_by_type() {
        let frame = mixed_frame();
        let sel = Selection::of_type(&frame, "A");
        assert_eq!(sel.len(), 4);
        assert_eq!(sel.count(), 2);
        assert_eq!(sel.indices(), vec![0, 2]);
        assert!(sel.contains(2));
        assert!(!sel.contains(1));
        assert!(!sel.contains(99));
    }

    #[test]
    fn selection_by_several_types() {
        let frame = mixed_frame();
        let sel = Selection::of_types(&frame, &["B", "C", "missing"]);
        assert_eq!(sel.indices(), vec![1, 3]);
    }

    #[test]
    fn unknown_type_selects_nothing() {
        let frame = mixed_frame();
        let sel = Selection::of_type(&frame, "Q");
        assert_eq!(sel.count(), 0);
        assert_eq!(sel.len(), 4);
    }

    #[test]
    fn equal_selections_compare_equal() {
        let frame = mixed_frame();
        assert_eq!(Selection::of_type(&frame, "A"), Selection::of_type(&frame, "A"));
        assert_ne!(Selection::of_type(&frame, "A"), Selection::of_type(&frame, "B"));
        assert_eq!(Selection::all(4).count(), 4);
    }

    #[test]
    fn with_positions_keeps_types() {
        let frame = mixed_frame();
        let moved = frame.with_positions(vec![[1.0; 3]; 4]);
        assert_eq!(moved.type_ids, frame.type_ids);
        assert_eq!(moved.positions[3], [1.0; 3]);
        assert_eq!(moved.bond_count(), 0);
    }
}
