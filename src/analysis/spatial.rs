//! Periodic cell list for neighbor search.
//!
//! Reference points are binned in fractional coordinates of the box, so the
//! grid is valid for triclinic cells. A query visits every cell whose
//! fractional extent could hold a point within the cutoff, wrapping
//! periodically, and measures candidates with the minimum-image distance.

use super::error::Error;
use crate::model::sim_box::{SimBox, norm, sub};

/// Upper bound on cells per lattice direction.
const MAX_CELLS_PER_AXIS: usize = 64;

/// One neighbor pair found by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborPair {
    /// Index into the query points.
    pub query_index: usize,
    /// Index into the reference points.
    pub point_index: usize,
    /// Minimum-image distance.
    pub distance: f64,
}

/// Cell list over a set of reference points in a periodic box.
#[derive(Debug)]
pub struct PeriodicGrid<'a> {
    sim_box: SimBox,
    points: &'a [[f64; 3]],
    r_max: f64,
    /// Perpendicular widths of the box, cached for minimum-image searches.
    widths: [f64; 3],
    /// Cells per lattice direction.
    dims: [usize; 3],
    /// Cell offsets to visit per lattice direction, already wrapped and deduplicated.
    stencil: [Vec<isize>; 3],
    /// Reference indices per cell, linear index `x + nx * (y + ny * z)`.
    cells: Vec<Vec<usize>>,
}

impl<'a> PeriodicGrid<'a> {
    /// Bins `points` into a grid sized for cutoff `r_max`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the box is invalid or `r_max` is not
    /// finite and positive.
    pub fn new(sim_box: SimBox, points: &'a [[f64; 3]], r_max: f64) -> Result<Self, Error> {
        if !sim_box.is_valid() {
            return Err(Error::invalid_range(format!(
                "box must have finite positive lengths and finite tilts: {sim_box:?}"
            )));
        }
        if !r_max.is_finite() || r_max <= 0.0 {
            return Err(Error::invalid_range(format!(
                "search radius must be finite and positive, got {r_max}"
            )));
        }

        let widths = sim_box.perpendicular_widths();
        let mut dims = [1usize; 3];
        let mut stencil: [Vec<isize>; 3] = Default::default();
        for axis in 0..3 {
            let n = ((widths[axis] / r_max).floor() as usize).clamp(1, MAX_CELLS_PER_AXIS);
            // reaching past n cells would only revisit the same cells
            let reach = ((r_max * n as f64 / widths[axis]).ceil() as usize).min(n);
            dims[axis] = n;
            stencil[axis] = axis_offsets(n, reach);
        }

        let mut grid = Self {
            sim_box,
            points,
            r_max,
            widths,
            dims,
            stencil,
            cells: vec![Vec::new(); dims[0] * dims[1] * dims[2]],
        };
        for (idx, pos) in points.iter().enumerate() {
            let cell = grid.linear_index(grid.cell_coords(*pos));
            grid.cells[cell].push(idx);
        }
        Ok(grid)
    }

    /// Number of cells along each lattice direction.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    fn cell_coords(&self, pos: [f64; 3]) -> [usize; 3] {
        let f = self.sim_box.to_fractional(pos);
        let mut coords = [0usize; 3];
        for axis in 0..3 {
            let u = f[axis] - f[axis].floor();
            coords[axis] = ((u * self.dims[axis] as f64) as usize).min(self.dims[axis] - 1);
        }
        coords
    }

    #[inline]
    fn linear_index(&self, c: [usize; 3]) -> usize {
        c[0] + self.dims[0] * (c[1] + self.dims[1] * c[2])
    }

    fn wrapped(&self, axis: usize, base: usize, offset: isize) -> usize {
        (base as isize + offset).rem_euclid(self.dims[axis] as isize) as usize
    }

    /// Calls `visit(point_index, distance)` for every reference point within
    /// the cutoff of `query`.
    fn for_each_neighbor(&self, query: [f64; 3], mut visit: impl FnMut(usize, f64)) {
        let [cx, cy, cz] = self.cell_coords(query);
        for &dz in &self.stencil[2] {
            let z = self.wrapped(2, cz, dz);
            for &dy in &self.stencil[1] {
                let y = self.wrapped(1, cy, dy);
                for &dx in &self.stencil[0] {
                    let x = self.wrapped(0, cx, dx);
                    for &idx in &self.cells[self.linear_index([x, y, z])] {
                        let delta = self
                            .sim_box
                            .minimum_image_within(sub(self.points[idx], query), self.widths);
                        let distance = norm(delta);
                        if distance <= self.r_max {
                            visit(idx, distance);
                        }
                    }
                }
            }
        }
    }

    /// Finds all `(query, reference)` pairs within the cutoff.
    ///
    /// With `exclude_self` the query points are taken to be the reference
    /// points themselves: each unordered pair is reported once with
    /// `query_index < point_index`, and no particle is paired with itself.
    pub fn query(&self, query_points: &[[f64; 3]], exclude_self: bool) -> Vec<NeighborPair> {
        let mut pairs = Vec::new();
        for (query_index, &pos) in query_points.iter().enumerate() {
            self.for_each_neighbor(pos, |point_index, distance| {
                if exclude_self && point_index <= query_index {
                    return;
                }
                pairs.push(NeighborPair {
                    query_index,
                    point_index,
                    distance,
                });
            });
        }
        pairs
    }
}

/// Distinct cell offsets covering `reach` cells either side on an axis of `n` cells.
///
/// When the stencil would wrap onto itself every cell is visited exactly once.
fn axis_offsets(n: usize, reach: usize) -> Vec<isize> {
    if reach.saturating_mul(2).saturating_add(1) >= n {
        (0..n as isize).collect()
    } else {
        (-(reach as isize)..=reach as isize).collect()
    }
}

/// Periodic neighbor search between two point sets.
///
/// Returns every pair whose minimum-image distance is at most `r_max`.
/// Enumeration order is unspecified. See [`PeriodicGrid::query`] for the
/// meaning of `exclude_self`.
pub fn query(
    sim_box: &SimBox,
    reference_points: &[[f64; 3]],
    query_points: &[[f64; 3]],
    r_max: f64,
    exclude_self: bool,
) -> Result<Vec<NeighborPair>, Error> {
    let grid = PeriodicGrid::new(*sim_box, reference_points, r_max)?;
    Ok(grid.query(query_points, exclude_self))
}
