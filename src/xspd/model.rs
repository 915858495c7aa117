//! Meshes in the model section of an XSPD block.
//!
//! The model section starts at a fixed offset into the block. Each model is
//! a header followed by three flat arrays: vertices, vertex normals, and faces
//! (each face carries its own face normal). There's no table saying which
//! vertices belong to which group; instead every vertex/normal record has a
//! sentinel field, and a particular sentinel value closes the current group.
//! See `Format::group_boundary`.

use cgmath::{vec3, Vector3};
use crate::errors::{ErrorKind, Result, ResultExt};
use crate::util::cur::Cur;
use super::format::{Format, GroupBoundary};

/// Offset of the model section from the start of the block.
pub const MODELS_ANCHOR: usize = 0x810;

/// Positions are 4.12 fixed point.
pub const POSITION_SCALE: f64 = 4096.0;

/// Normals are stored with the same scale but pointing inwards.
pub const NORMAL_SCALE: f64 = -POSITION_SCALE;

const UNKNOWN_HEADER_LEN: usize = 0x48;
const EXTENDED_RECORD_LEN: usize = 0x20;
const VERTEX_RECORD_LEN: usize = 8;
const FACE_RECORD_LEN: usize = VERTEX_RECORD_LEN + 8 + 2 + 2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vector3<f64>,
    pub group: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normal {
    pub dir: Vector3<f64>,
    pub group: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Face {
    /// Indices into the model's vertices (and normals). Triangles repeat one
    /// of the indices.
    pub verts: [u16; 4],
    pub normal: Normal,
    pub group: u32,
    pub texture: u16,
}

impl Face {
    /// The distinct vertex indices of the face, in stored order.
    ///
    /// Four for a quad, three for a triangle.
    pub fn distinct_verts(&self) -> Vec<u16> {
        let mut v = Vec::with_capacity(4);
        for &i in &self.verts {
            if !v.contains(&i) {
                v.push(i);
            }
        }
        v
    }

    pub fn is_triangle(&self) -> bool {
        self.distinct_verts().len() == 3
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub verts: Vec<Vertex>,
    /// Parallel to `verts`.
    pub normals: Vec<Normal>,
    pub faces: Vec<Face>,
    pub num_groups: u32,
}

/// Counts from a model header.
#[derive(Copy, Clone, Debug)]
pub struct ModelHeader {
    pub num_verts: u32,
    pub num_faces: u32,
    pub extended: (u16, u16, u16),
}

impl ModelHeader {
    fn extended_len(&self) -> usize {
        let (ed1, ed2, ed3) = self.extended;
        EXTENDED_RECORD_LEN * (ed1 as usize + ed2 as usize + ed3 as usize)
    }

    /// Bytes taken up by the vertex, normal, face and extended data.
    fn body_len(&self) -> usize {
        2 * VERTEX_RECORD_LEN * self.num_verts as usize
            + FACE_RECORD_LEN * self.num_faces as usize
            + self.extended_len()
    }
}

/// Result of a pass over the model section.
pub struct ModelSection {
    /// The decoded models (or just the one selected).
    pub models: Vec<Model>,
    /// Number of models in the section.
    pub num_models: u32,
    /// Position just past the last model; where the animation section starts.
    pub end: usize,
}

/// Which models to materialize on a pass over the section.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Select {
    All,
    Only(usize),
    /// Just walk the section, eg. to find where it ends.
    Nothing,
}

/// Tracks the current vertex group while walking a sentinel-tagged stream.
struct GroupCounter {
    boundary: GroupBoundary,
    current: u32,
}

impl GroupCounter {
    fn new(boundary: GroupBoundary) -> GroupCounter {
        GroupCounter { boundary, current: 0 }
    }

    /// Returns the group of a record with the given sentinel.
    fn next(&mut self, sentinel: u16) -> u32 {
        let group = self.current;
        if self.boundary.ends_group(sentinel) {
            self.current += 1;
        }
        group
    }
}

/// Reads the model section. `block` should be a cursor over the whole block.
pub fn read_models(block: Cur, format: &Format, select: Select) -> Result<ModelSection> {
    let mut cur = block;
    cur.jump_to(MODELS_ANCHOR)?;
    let num_models = cur.next::<u32>()?;
    debug!("{} models", num_models);

    if let Select::Only(n) = select {
        if n >= num_models as usize {
            bail!("no model {} (there are only {})", n, num_models);
        }
    }

    let mut models = vec![];
    for i in 0..num_models as usize {
        let header = read_model_header(&mut cur, format)?;
        debug!("model {}: {} verts, {} faces, extended {:?}",
            i, header.num_verts, header.num_faces, header.extended);

        let wanted = match select {
            Select::All => true,
            Select::Only(n) => n == i,
            Select::Nothing => false,
        };
        if wanted {
            let model = read_model_body(&mut cur, &header, format)?;
            debug!("model {}: {} groups", i, model.num_groups);
            models.push(model);
        } else {
            cur.jump_forward(header.body_len())?;
        }
    }

    Ok(ModelSection { models, num_models, end: cur.pos() })
}

fn read_model_header(cur: &mut Cur, format: &Format) -> Result<ModelHeader> {
    fields!(*cur, model_header {
        unknown: (skip(UNKNOWN_HEADER_LEN)),
        num_verts: u32,
        pad1: (zeros(8)),
        num_faces: u32,
        pad2: (zeros(4)),
        extended: (u16, u16, u16),
        pad3: (zeros(format.header_padding)),
        end: Cur,
    });
    *cur = end;
    Ok(ModelHeader { num_verts, num_faces, extended })
}

fn read_model_body(cur: &mut Cur, header: &ModelHeader, format: &Format) -> Result<Model> {
    let num_verts = header.num_verts as usize;
    let num_faces = header.num_faces as usize;

    // Refuse to allocate for counts the block can't possibly hold
    if header.body_len() > cur.bytes_remaining() {
        bail!(ErrorKind::TruncatedData(cur.pos(), header.body_len(), cur.bytes_remaining()));
    }

    let mut groups = GroupCounter::new(format.group_boundary);
    let mut verts = Vec::with_capacity(num_verts);
    for _ in 0..num_verts {
        let (pos, group) = read_record(cur, POSITION_SCALE, &mut groups)?;
        verts.push(Vertex { pos, group });
    }
    let num_groups = verts.last().map(|v| v.group + 1).unwrap_or(0);

    let mut groups = GroupCounter::new(format.group_boundary);
    let mut normals = Vec::with_capacity(num_verts);
    for _ in 0..num_verts {
        normals.push(read_normal(cur, &mut groups)?);
    }

    let mut groups = GroupCounter::new(format.group_boundary);
    let mut faces = Vec::with_capacity(num_faces);
    for i in 0..num_faces {
        let face = read_face(cur, &mut groups)?;
        for &v in &face.verts {
            check!((v as usize) < num_verts)
                .chain_err(|| format!("face {} references vertex {} of {}", i, v, num_verts))?;
        }
        faces.push(face);
    }

    // Extended data; don't know what this is
    cur.jump_forward(header.extended_len())?;

    Ok(Model { verts, normals, faces, num_groups })
}

/// Reads a vertex or normal record: three i16 components and a sentinel.
fn read_record(cur: &mut Cur, scale: f64, groups: &mut GroupCounter) -> Result<(Vector3<f64>, u32)> {
    let (x, y, z) = cur.next::<(i16, i16, i16)>()?;
    let sentinel = cur.next::<u16>()?;
    let v = vec3(x as f64, y as f64, z as f64) / scale;
    Ok((v, groups.next(sentinel)))
}

fn read_normal(cur: &mut Cur, groups: &mut GroupCounter) -> Result<Normal> {
    let (dir, group) = read_record(cur, NORMAL_SCALE, groups)?;
    Ok(Normal { dir, group })
}

fn read_face(cur: &mut Cur, groups: &mut GroupCounter) -> Result<Face> {
    let normal = read_normal(cur, groups)?;
    let (v0, v1, v2, v3) = cur.next::<(u16, u16, u16, u16)>()?;
    let texture = cur.next::<u16>()?;
    cur.jump_forward(2)?; // unknown
    Ok(Face {
        verts: [v0, v1, v2, v3],
        normal,
        group: normal.group,
        texture,
    })
}
