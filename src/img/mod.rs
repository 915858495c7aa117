//! Converting .IMG raster files.
//!
//! An .IMG is headerless: just 16-bit little-endian pixels in row-major
//! order. Red is in bits 0-4, green 5-9, blue 10-14, and bit 15 is the
//! PlayStation's semi-transparency bit. The dimensions aren't stored anywhere;
//! full-screen images (eg. the LOADxx.IMG loading screens) are 512x256.

mod encode;

pub use self::encode::write_rgba;

use clap::ArgMatches;
use std::fs;
use std::path::Path;
use crate::cli::{input_path, parse_num};
use crate::errors::{Result, ResultExt};
use crate::util::cur::Cur;

pub const FULLSCREEN_WIDTH: u32 = 512;
pub const FULLSCREEN_HEIGHT: u32 = 256;
/// Size in bytes of a full-screen image.
pub const FULLSCREEN_SIZE: usize = (FULLSCREEN_WIDTH * FULLSCREEN_HEIGHT * 2) as usize;

pub fn main(matches: &ArgMatches) -> Result<()> {
    let input = input_path(matches);
    let data = fs::read(&input)
        .chain_err(|| format!("couldn't read {}", input.display()))?;

    let (width, height) = match (matches.value_of("WIDTH"), matches.value_of("HEIGHT")) {
        (Some(w), Some(h)) => (parse_num(w, "--width")?, parse_num(h, "--height")?),
        _ => {
            if data.len() != FULLSCREEN_SIZE {
                warn!("{} bytes isn't the size of a full-screen image ({}); \
                    pass --width and --height", data.len(), FULLSCREEN_SIZE);
            }
            (FULLSCREEN_WIDTH, FULLSCREEN_HEIGHT)
        }
    };

    let rgba = decode(&data, width, height, matches.is_present("ALPHA"))?;

    let output = Path::new(matches.value_of_os("OUTPUT").unwrap_or_default());
    write_rgba(output, &rgba, width, height)?;
    info!("Wrote {}x{} image to {}.", width, height, output.display());
    Ok(())
}

/// Decodes an .IMG into RGBA8 pixels.
///
/// When `alpha` is set the semi-transparency bit becomes the alpha channel
/// (set = opaque); otherwise every pixel is opaque.
pub fn decode(data: &[u8], width: u32, height: u32, alpha: bool) -> Result<Vec<u8>> {
    let num_pixels = width as usize * height as usize;
    if data.len() != 2 * num_pixels {
        bail!("a {}x{} image should be {} bytes, but got {}",
            width, height, 2 * num_pixels, data.len());
    }

    let mut rgba = Vec::with_capacity(4 * num_pixels);
    for texel in Cur::new(data).next_n::<u16>(num_pixels)? {
        let [r, g, b, a] = rgb555a1(texel);
        rgba.extend_from_slice(&[r, g, b, if alpha { a } else { 0xff }]);
    }
    Ok(rgba)
}

/// Converts RGB555 color and the top bit into RGBA8888.
fn rgb555a1(texel: u16) -> [u8; 4] {
    let r5 = (texel & 0x1f) as u8;
    let g5 = ((texel >> 5) & 0x1f) as u8;
    let b5 = ((texel >> 10) & 0x1f) as u8;
    let a = if texel & 0x8000 != 0 { 0xff } else { 0 };
    [extend_5bit_to_8bit(r5), extend_5bit_to_8bit(g5), extend_5bit_to_8bit(b5), a]
}

/// Rounds `x / 31 * 255`.
fn extend_5bit_to_8bit(x: u8) -> u8 {
    ((x as u32 * 255 + 15) / 31) as u8
}
