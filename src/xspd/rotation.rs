//! Decodes formats for rotations.
//!
//! Old-style animations store a full 3x3 matrix per group; new-style ones
//! store a quaternion. Either way the posing code only ever sees a matrix,
//! produced by `Rotation::matrix`.

use cgmath::{vec3, InnerSpace, Matrix, Matrix3, Quaternion};
use crate::errors::Result;

/// Matrix entries are signed 1.15-ish fixed point, with 32767 meaning 1.0.
pub const MATRIX_SCALE: f64 = 32767.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Rotation {
    /// Old format.
    Matrix(Matrix3<f64>),
    /// New format: a unit quaternion and the game's index for the key frame
    /// it belongs to.
    Quaternion { quaternion: Quaternion<f64>, key_index: u16 },
}

impl Rotation {
    /// The rotation as a matrix `M` such that a row vector `v` is rotated to
    /// `v * M`.
    pub fn matrix(&self) -> Matrix3<f64> {
        match *self {
            Rotation::Quaternion { quaternion, .. } => Matrix3::from(quaternion),
            Rotation::Matrix(m) => m,
        }
    }

    pub fn key_index(&self) -> Option<u16> {
        match *self {
            Rotation::Quaternion { key_index, .. } => Some(key_index),
            Rotation::Matrix(_) => None,
        }
    }
}

/// Decodes a quaternion stored as (w, x, y, z) for the key frame `key_index`.
///
/// Only the direction of the stored vector matters; it's normalized here.
pub fn quaternion((w, x, y, z): (i16, i16, i16, i16), key_index: u16) -> Result<Rotation> {
    let q = Quaternion::from_sv(w as f64, vec3(x as f64, y as f64, z as f64));
    if q.magnitude2() == 0.0 {
        bail!("zero-length quaternion");
    }
    Ok(Rotation::Quaternion { quaternion: q.normalize(), key_index })
}

/// Decodes a row-major 3x3 matrix.
pub fn matrix(m: [i16; 9]) -> Rotation {
    let f = |i: usize| m[i] as f64 / MATRIX_SCALE;
    // Matrix3::new takes columns; give it rows and transpose
    let rows = Matrix3::new(
        f(0), f(1), f(2),
        f(3), f(4), f(5),
        f(6), f(7), f(8),
    );
    Rotation::Matrix(rows.transpose())
}
