//! Load XSPD blocks.
//!
//! The WAD files of the PS1 Harry Potter games are a series of tagged blocks.
//! The XSPD block holds the 3D models (meshes split into rigidly animated
//! vertex groups) and their joint animations. Nothing in the block points to
//! the animation section, so it can only be found by walking every model
//! first.

pub mod animation;
pub mod block;
pub mod format;
pub mod locate;
pub mod model;
pub mod pose;
pub mod rotation;
#[cfg(test)]
mod test_block;

pub use self::animation::Animation;
pub use self::block::Block;
pub use self::format::{Format, Release};
pub use self::model::{Face, Model};
pub use self::pose::apply_frame;

use std::path::Path;
use std::sync::OnceLock;
use crate::errors::Result;
use crate::util::cur::Cur;
use self::model::{read_models, ModelSection, Select};

pub const TAG: &[u8] = b"XSPD";

/// An XSPD block and the format to decode it with.
pub struct Xspd {
    block: Block,
    format: Format,
    /// Where the model section ends, once we know.
    models_end: OnceLock<usize>,
}

impl Xspd {
    /// Finds and reads the XSPD block in the WAD file at `path`.
    pub fn open(path: &Path, format: Format) -> Result<Xspd> {
        let offset = locate::find_block(path)?;
        let block = block::read_block(path, offset)?;
        Ok(Xspd::from_block(block, format))
    }

    pub fn from_block(block: Block, format: Format) -> Xspd {
        Xspd { block, format, models_end: OnceLock::new() }
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    fn read_models(&self, select: Select) -> Result<ModelSection> {
        let section = read_models(self.block.cur(), &self.format, select)?;
        let _ = self.models_end.set(section.end);
        Ok(section)
    }

    pub fn models(&self) -> Result<Vec<Model>> {
        Ok(self.read_models(Select::All)?.models)
    }

    /// Decodes just model `n`.
    pub fn model(&self, n: usize) -> Result<Model> {
        let mut section = self.read_models(Select::Only(n))?;
        match section.models.pop() {
            Some(model) => Ok(model),
            None => bail!("no model {}", n),
        }
    }

    /// Number of models in the block.
    pub fn num_models(&self) -> Result<u32> {
        Ok(self.read_models(Select::Nothing)?.num_models)
    }

    /// Offset of the animation section in the block.
    pub fn animations_offset(&self) -> Result<usize> {
        match self.models_end.get() {
            Some(&end) => Ok(end),
            None => Ok(self.read_models(Select::Nothing)?.end),
        }
    }

    pub fn animations(&self) -> Result<Vec<Animation>> {
        let offset = self.animations_offset()?;
        animation::read_animations(Cur::at(&self.block.data, offset)?)
    }
}
