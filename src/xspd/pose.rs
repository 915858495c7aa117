//! Posing a model with an animation frame.

use cgmath::{Matrix, Matrix3, Vector3};
use crate::errors::{ErrorKind, Result};
use super::animation::Frame;
use super::model::{Model, Normal, Vertex};

/// Applies `frame` to `model`, returning the posed copy.
///
/// Each vertex in group `g` is moved to `pos * R + T` where `R` and `T` are
/// the rotation and translation of subframe `g` (`pos` is a row vector).
/// Normals are only rotated. Everything else about the model is unchanged.
pub fn apply_frame(model: &Model, frame: &Frame) -> Result<Model> {
    if frame.subframes.len() != model.num_groups as usize {
        bail!(ErrorKind::GroupMismatch(format!(
            "model has {} groups but frame {} has {} subframes",
            model.num_groups, frame.index, frame.subframes.len(),
        )));
    }

    // Transposed so we can multiply row vectors on the left with cgmath's
    // column-vector convention
    let xforms: Vec<(Matrix3<f64>, Vector3<f64>)> = frame.subframes.iter()
        .map(|sf| (sf.rotation.matrix().transpose(), sf.translation))
        .collect();
    let xform = |group: u32| {
        xforms.get(group as usize).ok_or_else(|| {
            ErrorKind::GroupMismatch(format!(
                "group {} has no subframe in frame {} ({} subframes)",
                group, frame.index, xforms.len(),
            ))
        })
    };

    let mut verts = Vec::with_capacity(model.verts.len());
    for v in &model.verts {
        let &(rot, trans) = xform(v.group)?;
        verts.push(Vertex { pos: rot * v.pos + trans, group: v.group });
    }

    let mut normals = Vec::with_capacity(model.normals.len());
    for n in &model.normals {
        let &(rot, _) = xform(n.group)?;
        normals.push(Normal { dir: rot * n.dir, group: n.group });
    }

    Ok(Model {
        verts,
        normals,
        faces: model.faces.clone(),
        num_groups: model.num_groups,
    })
}
