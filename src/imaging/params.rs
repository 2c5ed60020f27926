//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the [`process`](crate::process) driver (which decides what variants to
//! write) and the [`operations`](super::operations) (which do the pixel work).
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 95). Clamped on construction.
//! - [`WarpParams`]: One concrete draw of rotation angle + perspective corner shifts.
//! - [`TileRect`]: A crop rectangle produced by the tile grid.

use rand::Rng;
use serde::Serialize;

/// Largest corner displacement, as a fraction of the image dimension.
pub const MAX_CORNER_SHIFT: f32 = 0.1;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// A fully sampled warp: rotation followed by a four-corner perspective shift.
///
/// Corner order is top-left, top-right, bottom-left, bottom-right. Each offset
/// is a fraction of the image size, `(dx / width, dy / height)`, so the same
/// draw can be applied to images of any size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WarpParams {
    /// Counter-clockwise rotation about the image centre, in degrees.
    pub angle_degrees: f32,
    pub corner_offsets: [(f32, f32); 4],
}

impl WarpParams {
    /// A warp that leaves the image geometry untouched.
    pub fn identity() -> Self {
        Self {
            angle_degrees: 0.0,
            corner_offsets: [(0.0, 0.0); 4],
        }
    }

    /// Draw a warp: angle uniform in `[-angle_range, angle_range]`, each corner
    /// offset component uniform in `[-MAX_CORNER_SHIFT, MAX_CORNER_SHIFT]`.
    ///
    /// The sign of `angle_range` is ignored. Angles are reduced modulo 360, so
    /// ranges wider than a full turn stay finite.
    pub fn sample<R: Rng + ?Sized>(angle_range: f32, rng: &mut R) -> Self {
        let angle_degrees = symmetric(rng, angle_range.abs()) % 360.0;
        let mut corner_offsets = [(0.0, 0.0); 4];
        for offset in &mut corner_offsets {
            *offset = (
                symmetric(rng, MAX_CORNER_SHIFT),
                symmetric(rng, MAX_CORNER_SHIFT),
            );
        }
        Self {
            angle_degrees,
            corner_offsets,
        }
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound == 0.0 {
        return 0.0;
    }
    // Scaling a unit draw keeps the range width finite for any finite bound
    rng.random_range(-1.0f32..=1.0) * bound
}

/// A crop rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_95() {
        assert_eq!(Quality::default().value(), 95);
    }

    #[test]
    fn sampled_warp_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let params = WarpParams::sample(5.0, &mut rng);
            assert!((-5.0..=5.0).contains(&params.angle_degrees));
            for (dx, dy) in params.corner_offsets {
                assert!((-MAX_CORNER_SHIFT..=MAX_CORNER_SHIFT).contains(&dx));
                assert!((-MAX_CORNER_SHIFT..=MAX_CORNER_SHIFT).contains(&dy));
            }
        }
    }

    #[test]
    fn zero_angle_range_never_rotates() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(WarpParams::sample(0.0, &mut rng).angle_degrees, 0.0);
        }
    }

    #[test]
    fn same_seed_same_draw() {
        let a = WarpParams::sample(30.0, &mut StdRng::seed_from_u64(42));
        let b = WarpParams::sample(30.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn negative_range_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let params = WarpParams::sample(-5.0, &mut rng);
            assert!((-5.0..=5.0).contains(&params.angle_degrees));
        }
    }

    #[test]
    fn huge_angle_range_stays_finite() {
        let mut rng = StdRng::seed_from_u64(1);
        for range in [f32::MAX, -f32::MAX, 3.0e38, 1.0e6] {
            let params = WarpParams::sample(range, &mut rng);
            assert!(params.angle_degrees.is_finite());
            assert!(params.angle_degrees.abs() < 360.0);
        }
    }

    #[test]
    fn identity_has_no_offsets() {
        let id = WarpParams::identity();
        assert_eq!(id.angle_degrees, 0.0);
        assert!(id.corner_offsets.iter().all(|&o| o == (0.0, 0.0)));
    }
}
