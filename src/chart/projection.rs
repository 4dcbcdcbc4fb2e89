//! Orthographic projection of 3-D points onto the plot plane.
//!
//! The plotting backend only has 2-D axes, so the Rabi trajectory through
//! `(P(x), P(y), P(z))` is projected for a fixed camera before drawing.

/// Camera looking at the origin from `elevation` above the x-y plane and
/// `azimuth` around the z axis (both in degrees, matplotlib conventions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    sin_az: f64,
    cos_az: f64,
    sin_el: f64,
    cos_el: f64,
}

impl Projection {
    pub fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
        let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
        Self {
            sin_az,
            cos_az,
            sin_el,
            cos_el,
        }
    }

    /// Screen coordinates `[right, up]` of a point.
    pub fn project(&self, [x, y, z]: [f64; 3]) -> [f64; 2] {
        let right = -x * self.sin_az + y * self.cos_az;
        let up = -(x * self.cos_az + y * self.sin_az) * self.sin_el + z * self.cos_el;
        [right, up]
    }
}

impl Default for Projection {
    /// The view used for Rabi trajectories.
    fn default() -> Self {
        Self::new(30.0, 220.0)
    }
}

/// The twelve edges of the unit cube `[0, 1]³`.
pub fn unit_cube_edges() -> Vec<([f64; 3], [f64; 3])> {
    let corner = |i: usize| {
        [
            (i & 1) as f64,
            ((i >> 1) & 1) as f64,
            ((i >> 2) & 1) as f64,
        ]
    };
    (0..8usize)
        .flat_map(|i| {
            (0..3)
                .map(move |bit| i | (1 << bit))
                .filter(move |&j| j != i)
                .map(move |j| (corner(i), corner(j)))
        })
        .collect()
}
