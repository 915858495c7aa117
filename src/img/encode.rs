use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::errors::{Result, ResultExt};

pub fn write_rgba(path: &Path, rgba: &[u8], width: u32, height: u32) -> Result<()> {
    let fout = File::create(path)
        .chain_err(|| format!("couldn't create {}", path.display()))?;
    encode_rgba(BufWriter::new(fout), rgba, width, height)
}

pub fn encode_rgba<W: Write>(w: W, rgba: &[u8], width: u32, height: u32) -> Result<()> {
    let mut enc = png::Encoder::new(w, width, height);
    enc.set_color(png::ColorType::RGBA);
    enc.set_depth(png::BitDepth::Eight);
    let mut writer = enc.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}
