//! Builds synthetic XSPD blocks for the decoder tests.

use super::format::{Format, GroupBoundary};
use super::model::MODELS_ANCHOR;

#[derive(Clone)]
pub struct TestFace {
    pub normal: ([i16; 3], u16),
    pub verts: [u16; 4],
    pub texture: u16,
}

impl TestFace {
    pub fn new(verts: [u16; 4], sentinel: u16) -> TestFace {
        TestFace { normal: ([0, 0, -4096], sentinel), verts, texture: 7 }
    }
}

#[derive(Clone)]
pub struct TestModel {
    pub verts: Vec<([i16; 3], u16)>,
    pub normals: Vec<([i16; 3], u16)>,
    pub faces: Vec<TestFace>,
    pub extended: [u16; 3],
}

impl TestModel {
    /// A model with one vertex per sentinel, normals sharing the sentinels,
    /// and no faces.
    pub fn grouped(sentinels: &[u16]) -> TestModel {
        let verts: Vec<_> = sentinels.iter().enumerate()
            .map(|(i, &s)| ([i as i16 * 16, 4096, -4096], s))
            .collect();
        let normals = sentinels.iter()
            .map(|&s| ([0, -4096, 0], s))
            .collect();
        TestModel { verts, normals, faces: vec![], extended: [0, 0, 0] }
    }
}

/// Three vertices in two groups ({0}, {1, 2}) and a single triangle.
pub fn triangle_model(boundary: GroupBoundary) -> TestModel {
    let close = boundary.new_group_sentinel;
    let open = close ^ 1;
    TestModel {
        verts: vec![
            ([4096, 0, 0], close),
            ([0, -2048, 0], open),
            ([0, 0, 4096], close),
        ],
        normals: vec![
            ([4096, 0, 0], close),
            ([0, 4096, 0], open),
            ([0, 0, 4096], close),
        ],
        faces: vec![TestFace::new([0, 1, 2, 2], open)],
        extended: [0, 1, 0],
    }
}

pub enum TestFrames {
    /// Per frame, per group: row-major matrix and translation.
    Old(Vec<Vec<([i16; 9], [i16; 3])>>),
    /// Per frame, per group: (w, x, y, z) quaternion, translation, frame index.
    New(Vec<Vec<([i16; 4], [i16; 3], u16)>>),
}

pub struct TestAnimation {
    pub uc: u32,
    pub num_frames: u32,
    pub uk: u32,
    pub num_groups: u32,
    pub frames: TestFrames,
}

pub const IDENTITY: [i16; 9] = [32767, 0, 0, 0, 32767, 0, 0, 0, 32767];

/// An old-format animation holding `num_frames` identity frames, each
/// translating group `g` by `g` units along x in frame `f` times `f`.
pub fn old_animation(num_frames: u32, num_groups: u32) -> TestAnimation {
    let frames = (0..num_frames).map(|f| {
        (0..num_groups).map(|g| (IDENTITY, [(f * g * 4096) as i16, 0, 0])).collect()
    }).collect();
    TestAnimation { uc: 3, num_frames, uk: 0, num_groups, frames: TestFrames::Old(frames) }
}

/// A new-format animation with key frames at indices 2, 5, 8, ...
pub fn new_animation(num_frames: u32, stored: u32, num_groups: u32) -> TestAnimation {
    let frames = (0..stored).map(|f| {
        (0..num_groups).map(|_| ([4096, 0, 0, 0], [0, 2048, 0], (3 * f + 2) as u16)).collect()
    }).collect();
    TestAnimation { uc: 2, num_frames, uk: 1, num_groups, frames: TestFrames::New(frames) }
}

struct Bytes(Vec<u8>);

impl Bytes {
    fn u16(&mut self, x: u16) { self.0.extend_from_slice(&x.to_le_bytes()); }
    fn i16(&mut self, x: i16) { self.0.extend_from_slice(&x.to_le_bytes()); }
    fn u32(&mut self, x: u32) { self.0.extend_from_slice(&x.to_le_bytes()); }
    fn fill(&mut self, n: usize, b: u8) { self.0.extend(std::iter::repeat(b).take(n)); }

    fn record(&mut self, &(v, sentinel): &([i16; 3], u16)) {
        for &x in &v { self.i16(x); }
        self.u16(sentinel);
    }
}

/// Builds a whole block: header, filler up to the model section, the models,
/// then the animations.
pub fn build_block(format: &Format, models: &[TestModel], anims: &[TestAnimation]) -> Vec<u8> {
    let mut b = Bytes(vec![]);
    b.0.extend_from_slice(b"XSPD");
    b.u32(0); // patched below
    b.fill(MODELS_ANCHOR - 8, 0xCD);

    b.u32(models.len() as u32);
    for m in models {
        b.fill(0x48, 0x5A);
        b.u32(m.verts.len() as u32);
        b.fill(8, 0);
        b.u32(m.faces.len() as u32);
        b.fill(4, 0);
        for &e in &m.extended { b.u16(e); }
        b.fill(format.header_padding, 0);
        for v in &m.verts { b.record(v); }
        for n in &m.normals { b.record(n); }
        for f in &m.faces {
            b.record(&f.normal);
            for &i in &f.verts { b.u16(i); }
            b.u16(f.texture);
            b.u16(0xBEEF);
        }
        let ext: u16 = m.extended.iter().sum();
        b.fill(0x20 * ext as usize, 0x77);
    }

    b.u32(anims.len() as u32);
    for a in anims {
        let stored = match a.frames {
            TestFrames::Old(_) => 0,
            TestFrames::New(ref frames) => frames.len() as u32,
        };
        b.u32(a.uc);
        b.fill(4, 0);
        b.u32(a.num_frames);
        b.u32(a.uk);
        b.fill(8, 0);
        b.u32(a.num_groups);
        b.fill(4, 0);
        b.u32(stored);
        b.fill(0xC, 0);

        b.fill(4 * a.uc as usize, 0x31);
        if a.uk == 0 {
            b.fill(8 * a.num_frames as usize, 0x32);
        }
        b.fill(4 * a.num_frames as usize + 4 * stored as usize, 0x33);

        match a.frames {
            TestFrames::Old(ref frames) => {
                for frame in frames {
                    for &(m, t) in frame {
                        for &x in &m { b.i16(x); }
                        for &x in &t { b.i16(x); }
                    }
                }
            }
            TestFrames::New(ref frames) => {
                for frame in frames {
                    for &(q, t, idx) in frame {
                        for &x in &q { b.i16(x); }
                        for &x in &t { b.i16(x); }
                        b.u16(idx);
                    }
                }
            }
        }
    }

    let len = (b.0.len() - 8) as u32;
    b.0[4..8].copy_from_slice(&len.to_le_bytes());
    b.0
}
