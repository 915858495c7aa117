//! Wavefront OBJ writer.
//!
//! Vertex `i` and vertex normal `i` go together, so every face corner is
//! written `a//a`. OBJ indices are 1-based.

use std::fmt::{self, Write};
use crate::xspd::{Face, Model};

pub fn write<W: Write>(w: &mut W, model: &Model) -> fmt::Result {
    writeln!(w, "# vertices")?;
    for v in &model.verts {
        writeln!(w, "v {} {} {}", v.pos.x, v.pos.y, v.pos.z)?;
    }

    writeln!(w, "\n# vertex normals")?;
    for n in &model.normals {
        writeln!(w, "vn {} {} {}", n.dir.x, n.dir.y, n.dir.z)?;
    }

    writeln!(w, "\n# faces")?;
    for (i, face) in model.faces.iter().enumerate() {
        match corners(face) {
            Some(corners) => {
                write!(w, "f")?;
                for &c in &corners {
                    let c = c as u32 + 1;
                    write!(w, " {}//{}", c, c)?;
                }
                writeln!(w)?;
            }
            None => debug!("skipping degenerate face {} {:?}", i, face.verts),
        }
    }
    Ok(())
}

/// The corners of the face in OBJ winding order, or `None` if it doesn't
/// have enough distinct vertices to be a polygon.
fn corners(face: &Face) -> Option<Vec<u16>> {
    // Faces are stored in strip order; triangles just repeat a corner
    let v = face.verts;
    let mut corners = Vec::with_capacity(4);
    for &i in &[v[0], v[1], v[3], v[2]] {
        if !corners.contains(&i) {
            corners.push(i);
        }
    }
    if corners.len() >= 3 { Some(corners) } else { None }
}
