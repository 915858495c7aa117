//! Joint animations.
//!
//! The animation section follows the last model with no offset pointing to
//! it. Each animation gives every vertex group a rigid transform per frame.
//! There are two mutually exclusive encodings, picked by the stored frame
//! count in the animation header:
//!
//! * old (stored frames = 0): every frame is stored, each group gets a
//!   row-major rotation matrix and a translation.
//! * new (stored frames = N > 0): only N key frames are stored, each group
//!   gets a quaternion, a translation, and the key's native frame index. The
//!   frames in between are meant to be interpolated; we don't do that.

use cgmath::{vec3, Vector3};
use crate::errors::{ErrorKind, Result};
use crate::util::cur::Cur;
use super::model::POSITION_SCALE;
use super::rotation::{self, Rotation};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Subframe {
    pub group: u32,
    /// A matrix for old-format animations; a quaternion and key frame index
    /// for new-format ones.
    pub rotation: Rotation,
    pub translation: Vector3<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// For new-format animations, the game's key frame index; for old-format
    /// ones, the position of the frame in the animation.
    pub index: u32,
    /// One per group, in group order.
    pub subframes: Vec<Subframe>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimationFormat {
    Old,
    New,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub format: AnimationFormat,
    /// Total length of the animation in frames (including frames that have
    /// to be interpolated for new-format animations).
    pub num_frames: u32,
    pub num_groups: u32,
    pub frames: Vec<Frame>,
}

/// Fields of the animation header we need to walk past the animation.
#[derive(Copy, Clone, Debug)]
struct AnimationHeader {
    uc: u32,
    num_frames: u32,
    uk: u32,
    num_groups: u32,
    stored_frames: u32,
}

const OLD_SUBFRAME_LEN: usize = 2 * (9 + 3);
const NEW_SUBFRAME_LEN: usize = 2 * (4 + 3 + 1);

/// Reads the animation section starting at `cur`, which should be where the
/// model section ended.
pub fn read_animations(cur: Cur) -> Result<Vec<Animation>> {
    let mut cur = cur;
    let num_animations = cur.next::<u32>()?;
    debug!("{} animations", num_animations);

    (0..num_animations).map(|i| {
        let anim = read_animation(&mut cur)?;
        debug!("animation {}: {:?}, {} frames ({} stored), {} groups",
            i, anim.format, anim.num_frames, anim.frames.len(), anim.num_groups);
        Ok(anim)
    }).collect()
}

fn read_animation(cur: &mut Cur) -> Result<Animation> {
    fields!(*cur, animation {
        uc: u32,
        pad1: (zeros(4)),
        num_frames: u32,
        uk: u32,
        pad2: (zeros(8)),
        num_groups: u32,
        pad3: (zeros(4)),
        stored_frames: u32,
        pad4: (zeros(0xC)),
        end: Cur,
    });
    *cur = end;
    let header = AnimationHeader { uc, num_frames, uk, num_groups, stored_frames };

    skip_tables(cur, &header)?;

    let (format, frames) = if stored_frames == 0 {
        (AnimationFormat::Old, read_old_frames(cur, &header)?)
    } else {
        (AnimationFormat::New, read_new_frames(cur, &header)?)
    };

    Ok(Animation { format, num_frames, num_groups, frames })
}

/// Skips the index/lookup tables between the header and the frames. These
/// are presumably for interpolation; we don't decode them.
fn skip_tables(cur: &mut Cur, h: &AnimationHeader) -> Result<()> {
    let mut len = 4 * h.uc as usize;
    if h.uk == 0 {
        len += 8 * h.num_frames as usize;
    }
    len += 4 * h.num_frames as usize + 4 * h.stored_frames as usize;
    trace!("skipping {:#x} bytes of tables at {:#x}", len, cur.pos());
    cur.jump_forward(len)
}

/// Checks that `count` frames of `subframe_len`-byte subframes fit in what's
/// left of the buffer before allocating for them.
fn check_frames_fit(cur: &Cur, count: u32, h: &AnimationHeader, subframe_len: usize) -> Result<()> {
    let needed = (count as u64) * (h.num_groups as u64) * subframe_len as u64;
    if needed > cur.bytes_remaining() as u64 {
        bail!(ErrorKind::TruncatedData(cur.pos(), needed as usize, cur.bytes_remaining()));
    }
    Ok(())
}

fn read_translation(cur: &mut Cur) -> Result<Vector3<f64>> {
    let (x, y, z) = cur.next::<(i16, i16, i16)>()?;
    Ok(vec3(x as f64, y as f64, z as f64) / POSITION_SCALE)
}

fn read_old_frames(cur: &mut Cur, h: &AnimationHeader) -> Result<Vec<Frame>> {
    check_frames_fit(cur, h.num_frames, h, OLD_SUBFRAME_LEN)?;

    let mut frames = Vec::with_capacity(h.num_frames as usize);
    for index in 0..h.num_frames {
        let mut subframes = Vec::with_capacity(h.num_groups as usize);
        for group in 0..h.num_groups {
            let mut m = [0i16; 9];
            for (dst, src) in m.iter_mut().zip(cur.next_n::<i16>(9)?) {
                *dst = src;
            }
            let translation = read_translation(cur)?;
            subframes.push(Subframe {
                group,
                rotation: rotation::matrix(m),
                translation,
            });
        }
        frames.push(Frame { index, subframes });
    }
    Ok(frames)
}

fn read_new_frames(cur: &mut Cur, h: &AnimationHeader) -> Result<Vec<Frame>> {
    check_frames_fit(cur, h.stored_frames, h, NEW_SUBFRAME_LEN)?;

    let mut frames = Vec::with_capacity(h.stored_frames as usize);
    for position in 0..h.stored_frames {
        let mut subframes = Vec::with_capacity(h.num_groups as usize);
        for group in 0..h.num_groups {
            let quat = cur.next::<(i16, i16, i16, i16)>()?;
            let translation = read_translation(cur)?;
            let key_index = cur.next::<u16>()?;
            subframes.push(Subframe {
                group,
                rotation: rotation::quaternion(quat, key_index)?,
                translation,
            });
        }
        // All the subframes share the frame's index
        let index = subframes.first()
            .and_then(|sf| sf.rotation.key_index())
            .map(|i| i as u32)
            .unwrap_or(position);
        frames.push(Frame { index, subframes });
    }
    Ok(frames)
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::{InnerSpace, Matrix3, SquareMatrix};
    use crate::xspd::format::Format;
    use crate::xspd::model::{read_models, Select};
    use crate::xspd::test_block::*;

    fn decode(data: &[u8]) -> Result<Vec<Animation>> {
        let format = Format::default();
        let section = read_models(Cur::new(data), &format, Select::All)?;
        read_animations(Cur::at(data, section.end)?)
    }

    fn block(anims: &[TestAnimation]) -> Vec<u8> {
        let format = Format::default();
        build_block(&format, &[triangle_model(format.group_boundary)], anims)
    }

    #[test]
    fn old_format() {
        let anims = decode(&block(&[old_animation(4, 2)])).unwrap();
        assert_eq!(anims.len(), 1);
        let anim = &anims[0];
        assert_eq!(anim.format, AnimationFormat::Old);
        assert_eq!(anim.num_frames, 4);
        assert_eq!(anim.frames.len(), 4);
        assert_eq!(anim.num_groups, 2);
        for (i, frame) in anim.frames.iter().enumerate() {
            assert_eq!(frame.index, i as u32);
            assert_eq!(frame.subframes.len(), anim.num_groups as usize);
            for (g, sf) in frame.subframes.iter().enumerate() {
                assert_eq!(sf.group, g as u32);
                assert_eq!(sf.rotation.key_index(), None);
                match sf.rotation {
                    Rotation::Matrix(m) => {
                        assert!((0..3).all(|c| (m[c] - Matrix3::identity()[c]).magnitude() < 1e-6));
                    }
                    _ => panic!("old format should give matrices"),
                }
                let expected = vec3((i * g) as f64, 0.0, 0.0);
                assert!((sf.translation - expected).magnitude() < 1e-6);
            }
        }
    }

    #[test]
    fn new_format() {
        let anims = decode(&block(&[new_animation(20, 5, 3)])).unwrap();
        let anim = &anims[0];
        assert_eq!(anim.format, AnimationFormat::New);
        assert_eq!(anim.num_frames, 20);
        assert_eq!(anim.frames.len(), 5);
        for (i, frame) in anim.frames.iter().enumerate() {
            assert_eq!(frame.index, 3 * i as u32 + 2);
            assert_ne!(frame.index, i as u32);
            assert_eq!(frame.subframes.len(), 3);
            for sf in &frame.subframes {
                match sf.rotation {
                    Rotation::Quaternion { key_index, .. } => {
                        assert_eq!(key_index as u32, frame.index);
                    }
                    _ => panic!("new format should give quaternions"),
                }
                assert!((sf.translation - vec3(0.0, 0.5, 0.0)).magnitude() < 1e-6);
            }
        }
    }

    #[test]
    fn several_animations() {
        let mut with_uk = old_animation(2, 2);
        with_uk.uk = 7;
        let data = block(&[old_animation(3, 2), new_animation(9, 2, 2), with_uk]);
        let anims = decode(&data).unwrap();
        let counts: Vec<usize> = anims.iter().map(|a| a.frames.len()).collect();
        assert_eq!(counts, vec![3, 2, 2]);
        for anim in &anims {
            assert!(anim.frames.iter().all(|f| f.subframes.len() == anim.num_groups as usize));
        }
    }

    #[test]
    fn no_animations() {
        assert!(decode(&block(&[])).unwrap().is_empty());
    }

    #[test]
    fn nonzero_padding_is_fatal() {
        let mut data = block(&[old_animation(1, 1)]);
        let start = {
            let format = Format::default();
            read_models(Cur::new(&data), &format, Select::All).unwrap().end
        };
        // The 4 zero bytes after uc
        data[start + 4 + 4] = 0xFF;
        match *decode(&data).unwrap_err().kind() {
            ErrorKind::UnexpectedNonZeroPadding(pos, 4) => assert_eq!(pos, start + 8),
            ref k => panic!("wrong error: {:?}", k),
        }
    }

    #[test]
    fn truncated_frames() {
        let data = block(&[old_animation(3, 2)]);
        let start = read_models(Cur::new(&data), &Format::default(), Select::All).unwrap().end;
        // Count, header, then uc * 4 + num_frames * 12 bytes of tables
        let frames_at = start + 4 + 0x30 + 3 * 4 + 3 * 12;
        match *decode(&data[..data.len() - 1]).unwrap_err().kind() {
            ErrorKind::TruncatedData(pos, requested, remaining) => {
                assert_eq!(pos, frames_at);
                assert_eq!(requested, 3 * 2 * OLD_SUBFRAME_LEN);
                assert_eq!(remaining, requested - 1);
            }
            ref k => panic!("wrong error: {:?}", k),
        }
    }
}
