//! A unit cube, used by the demo binary and the benchmarks.

use crate::math::fixed::{from_int, FIXED_ONE};
use crate::math::Vec4x;

pub const N_CUBE_VERTICES: usize = 8;
pub const N_CUBE_FACES: usize = 12;

const ONE: i32 = FIXED_ONE;
const NEG: i32 = from_int(-1);

/// Object-space corners of the cube `[-1, 1]^3`.
pub const CUBE_VERTICES: [Vec4x; N_CUBE_VERTICES] = [
    Vec4x::point(NEG, NEG, NEG),
    Vec4x::point(NEG, ONE, NEG),
    Vec4x::point(ONE, ONE, NEG),
    Vec4x::point(ONE, NEG, NEG),
    Vec4x::point(ONE, ONE, ONE),
    Vec4x::point(ONE, NEG, ONE),
    Vec4x::point(NEG, ONE, ONE),
    Vec4x::point(NEG, NEG, ONE),
];

/// Triangles as indices into [`CUBE_VERTICES`].
pub const CUBE_FACES: [[usize; 3]; N_CUBE_FACES] = [
    // Front
    [0, 1, 2],
    [0, 2, 3],
    // Right
    [3, 2, 4],
    [3, 4, 5],
    // Back
    [5, 4, 6],
    [5, 6, 7],
    // Left
    [7, 6, 1],
    [7, 1, 0],
    // Top
    [1, 6, 4],
    [1, 4, 2],
    // Bottom
    [5, 7, 0],
    [5, 0, 3],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vertex_is_used() {
        let mut used = [false; N_CUBE_VERTICES];
        for face in CUBE_FACES {
            for i in face {
                used[i] = true;
            }
        }
        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn corners_are_unit_points() {
        for v in CUBE_VERTICES {
            assert_eq!(v.w, FIXED_ONE);
            assert_eq!(v.x.abs(), FIXED_ONE);
        }
    }
}
