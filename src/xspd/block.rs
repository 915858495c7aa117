//! Reading an XSPD block out of a WAD file into memory.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use crate::errors::{ErrorKind, Result, ResultExt};
use crate::util::cur::Cur;
use super::TAG;

/// The raw bytes of an XSPD block, starting with its tag.
pub struct Block {
    /// Offset of the block in the file it was read from.
    pub offset: u64,
    pub data: Vec<u8>,
}

impl Block {
    /// A fresh cursor at the start of the block.
    pub fn cur(&self) -> Cur {
        Cur::new(&self.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

pub fn read_block(path: &Path, offset: u64) -> Result<Block> {
    let f = File::open(path)
        .chain_err(|| format!("couldn't open {}", path.display()))?;
    read_block_from(f, offset)
}

/// Reads the block at `offset`.
///
/// The header is the tag followed by a u32 giving the distance from the end
/// of the header to the next block, so the whole block is `length + 8` bytes.
pub fn read_block_from<R: Read + Seek>(mut r: R, offset: u64) -> Result<Block> {
    r.seek(SeekFrom::Start(offset))?;

    let mut header = [0u8; 8];
    let got = read_up_to(&mut r, &mut header)?;
    if got < 4 || &header[0..4] != TAG {
        bail!(ErrorKind::InvalidHeader(offset, header[..got.min(4)].to_vec()));
    }
    if got < 8 {
        bail!(ErrorKind::TruncatedBlock(offset, 8, got as u64));
    }
    let length = Cur::new(&header[4..8]).next::<u32>()?;
    let block_len = length as u64 + 8;
    trace!("block@{:#x}: length field {:#x}", offset, length);

    r.seek(SeekFrom::Start(offset))?;
    let mut data = Vec::new();
    r.take(block_len).read_to_end(&mut data)?;
    if (data.len() as u64) < block_len {
        bail!(ErrorKind::TruncatedBlock(offset, block_len, data.len() as u64));
    }

    debug!("read {:#x} byte block at {:#x}", block_len, offset);
    Ok(Block { offset, data })
}

/// Like `read_exact` but returns how many bytes it got when it hits EOF.
fn read_up_to<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut got = 0;
    while got < buf.len() {
        match r.read(&mut buf[got..]) {
            Ok(0) => break,
            Ok(n) => got += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => (),
            Err(e) => return Err(e),
        }
    }
    Ok(got)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn file_with_block(prefix: usize, length: u32, body: usize) -> Vec<u8> {
        let mut v = vec![0xEEu8; prefix];
        v.extend_from_slice(b"XSPD");
        v.extend_from_slice(&length.to_le_bytes());
        v.extend(std::iter::repeat(0x11).take(body));
        v
    }

    #[test]
    fn reads_exact_range() {
        // Trailing bytes belong to the next block
        let v = file_with_block(10, 4, 20);
        let block = read_block_from(Cursor::new(v), 10).unwrap();
        assert_eq!(block.offset, 10);
        assert_eq!(block.len(), 12);
        assert_eq!(&block.data[0..4], b"XSPD");
        assert_eq!(&block.data[8..], &[0x11; 4]);
    }

    #[test]
    fn wrong_tag() {
        let v = file_with_block(10, 4, 4);
        match *read_block_from(Cursor::new(v), 9).err().unwrap().kind() {
            ErrorKind::InvalidHeader(offset, ref found) => {
                assert_eq!(offset, 9);
                assert_eq!(&found[..], &[0xEE, b'X', b'S', b'P']);
            }
            ref k => panic!("wrong error: {:?}", k),
        }
    }

    #[test]
    fn truncated() {
        let v = file_with_block(0, 100, 50);
        match *read_block_from(Cursor::new(v), 0).err().unwrap().kind() {
            ErrorKind::TruncatedBlock(_, expected, available) => {
                assert_eq!((expected, available), (108, 58));
            }
            ref k => panic!("wrong error: {:?}", k),
        }
    }

    #[test]
    fn from_file() {
        use std::io::Write;

        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&file_with_block(3, 0, 0)).unwrap();
        let block = read_block(f.path(), 3).unwrap();
        assert_eq!(block.data, b"XSPD\0\0\0\0".to_vec());
    }
}
