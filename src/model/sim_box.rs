use serde::{Deserialize, Serialize};

/// Periodic simulation cell in the HOOMD convention.
///
/// The cell is described by three edge lengths and three dimensionless tilt
/// factors. Its lattice vectors are
///
/// - `a1 = (lx, 0, 0)`
/// - `a2 = (xy·ly, ly, 0)`
/// - `a3 = (xz·lz, yz·lz, lz)`
///
/// An orthorhombic box has all tilt factors equal to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimBox {
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
    #[serde(default)]
    pub xy: f64,
    #[serde(default)]
    pub xz: f64,
    #[serde(default)]
    pub yz: f64,
}

impl SimBox {
    /// Creates a cubic box with edge length `l`.
    pub fn cube(l: f64) -> Self {
        Self::orthorhombic(l, l, l)
    }

    /// Creates a rectangular box with the given edge lengths.
    pub fn orthorhombic(lx: f64, ly: f64, lz: f64) -> Self {
        Self::triclinic(lx, ly, lz, 0.0, 0.0, 0.0)
    }

    /// Creates a general triclinic box from edge lengths and tilt factors.
    pub fn triclinic(lx: f64, ly: f64, lz: f64, xy: f64, xz: f64, yz: f64) -> Self {
        Self {
            lx,
            ly,
            lz,
            xy,
            xz,
            yz,
        }
    }

    #[inline]
    pub fn lengths(&self) -> [f64; 3] {
        [self.lx, self.ly, self.lz]
    }

    #[inline]
    pub fn is_orthorhombic(&self) -> bool {
        self.xy == 0.0 && self.xz == 0.0 && self.yz == 0.0
    }

    /// Returns `true` if all lengths are finite and positive and all tilts are finite.
    pub fn is_valid(&self) -> bool {
        self.lengths().iter().all(|l| l.is_finite() && *l > 0.0)
            && [self.xy, self.xz, self.yz].iter().all(|t| t.is_finite())
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        self.lx * self.ly * self.lz
    }

    /// Lattice vectors `[a1, a2, a3]`.
    pub fn lattice_vectors(&self) -> [[f64; 3]; 3] {
        [
            [self.lx, 0.0, 0.0],
            [self.xy * self.ly, self.ly, 0.0],
            [self.xz * self.lz, self.yz * self.lz, self.lz],
        ]
    }

    /// Converts a Cartesian vector into lattice (fractional) coordinates.
    pub fn to_fractional(&self, v: [f64; 3]) -> [f64; 3] {
        let f3 = v[2] / self.lz;
        let f2 = (v[1] - f3 * self.yz * self.lz) / self.ly;
        let f1 = (v[0] - f2 * self.xy * self.ly - f3 * self.xz * self.lz) / self.lx;
        [f1, f2, f3]
    }

    /// Converts lattice (fractional) coordinates back into a Cartesian vector.
    pub fn from_fractional(&self, f: [f64; 3]) -> [f64; 3] {
        [
            f[0] * self.lx + f[1] * self.xy * self.ly + f[2] * self.xz * self.lz,
            f[1] * self.ly + f[2] * self.yz * self.lz,
            f[2] * self.lz,
        ]
    }

    /// Maps a position into the primary cell, whose fractional coordinates lie in `[0, 1)`.
    pub fn wrap(&self, pos: [f64; 3]) -> [f64; 3] {
        let mut f = self.to_fractional(pos);
        for c in &mut f {
            *c -= c.floor();
        }
        self.from_fractional(f)
    }

    /// Shortest periodic image of a displacement vector.
    ///
    /// Rounding the fractional coordinates is exact for orthorhombic cells and
    /// for images shorter than half the narrowest perpendicular width. Longer
    /// images in a tilted cell are checked against every lattice translation
    /// that could still shorten them.
    pub fn minimum_image(&self, delta: [f64; 3]) -> [f64; 3] {
        self.minimum_image_within(delta, self.perpendicular_widths())
    }

    /// [`minimum_image`](Self::minimum_image) with precomputed perpendicular widths.
    pub(crate) fn minimum_image_within(&self, delta: [f64; 3], widths: [f64; 3]) -> [f64; 3] {
        let mut f = self.to_fractional(delta);
        for c in &mut f {
            *c -= c.round();
        }
        let rounded = self.from_fractional(f);
        if self.is_orthorhombic() {
            return rounded;
        }

        let len = norm(rounded);
        let min_width = widths[0].min(widths[1]).min(widths[2]);
        if 2.0 * len <= min_width {
            return rounded;
        }

        // A shorter image v satisfies |f_k(v)| * w_k <= |v| <= len on each axis.
        let shifts = |axis: usize| {
            let span = len / widths[axis];
            let lo = (-span - f[axis]).ceil() as i64;
            let hi = (span - f[axis]).floor() as i64;
            lo..=hi
        };
        let mut best = rounded;
        let mut best_len2 = len * len;
        for m0 in shifts(0) {
            for m1 in shifts(1) {
                for m2 in shifts(2) {
                    if m0 == 0 && m1 == 0 && m2 == 0 {
                        continue;
                    }
                    let image = self.from_fractional([
                        f[0] + m0 as f64,
                        f[1] + m1 as f64,
                        f[2] + m2 as f64,
                    ]);
                    let len2 = dot(image, image);
                    if len2 < best_len2 {
                        best = image;
                        best_len2 = len2;
                    }
                }
            }
        }
        best
    }

    /// Minimum-image distance between two positions.
    pub fn distance(&self, a: [f64; 3], b: [f64; 3]) -> f64 {
        norm(self.minimum_image(sub(b, a)))
    }

    /// Distances between opposite faces of the cell, one per lattice direction.
    pub fn perpendicular_widths(&self) -> [f64; 3] {
        let [a1, a2, a3] = self.lattice_vectors();
        let volume = self.volume();
        [
            volume / norm(cross(a2, a3)),
            volume / norm(cross(a3, a1)),
            volume / norm(cross(a1, a2)),
        ]
    }

    /// Largest cutoff strictly below half the shortest edge length.
    ///
    /// Uses the representable value immediately below `min(lx, ly, lz) / 2` so the
    /// minimum image of a pair at the cutoff is never ambiguous.
    pub fn default_r_max(&self) -> f64 {
        let half = 0.5 * self.lx.min(self.ly).min(self.lz);
        next_down(half)
    }
}

pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn next_down(x: f64) -> f64 {
    if !x.is_finite() || x <= 0.0 {
        return x;
    }
    f64::from_bits(x.to_bits() - 1)
}
