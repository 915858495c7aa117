//! Finding the XSPD block in a WAD file.
//!
//! There's no table of contents we understand yet, so we just look for the
//! tag. WAD files are large, so the search reads the file a chunk at a time.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use crate::errors::{ErrorKind, Result, ResultExt};
use super::TAG;

/// Size of the reads done while searching.
pub const CHUNK_SIZE: usize = 4 * 1024 * 1024;

/// Returns the offset of the first XSPD tag in the file at `path`.
pub fn find_block(path: &Path) -> Result<u64> {
    let f = File::open(path)
        .chain_err(|| format!("couldn't open {}", path.display()))?;
    match find_tag(f, TAG, CHUNK_SIZE)? {
        Some(offset) => {
            debug!("found {} block at {:#x}", String::from_utf8_lossy(TAG), offset);
            Ok(offset)
        }
        None => bail!(ErrorKind::BlockNotFound(String::from_utf8_lossy(TAG).into_owned())),
    }
}

/// Returns the offset of the first occurence of `tag` in `r`, reading
/// `chunk_size` bytes at a time.
///
/// The last `tag.len() - 1` bytes of each chunk are carried over to the
/// front of the next one, so a tag split across two reads is still found.
pub fn find_tag<R: Read>(mut r: R, tag: &[u8], chunk_size: usize) -> Result<Option<u64>> {
    assert!(!tag.is_empty());
    assert!(chunk_size > 0);

    let overlap = tag.len() - 1;
    let mut buf = vec![0u8; overlap + chunk_size];
    // Number of bytes at the front of buf carried over from the last chunk
    let mut carried = 0;
    // File offset of buf[0]
    let mut base = 0u64;

    loop {
        let n = match r.read(&mut buf[carried..carried + chunk_size]) {
            Ok(0) => return Ok(None),
            Ok(n) => n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        let filled = carried + n;

        if let Some(i) = buf[..filled].windows(tag.len()).position(|w| w == tag) {
            return Ok(Some(base + i as u64));
        }

        let keep = overlap.min(filled);
        buf.copy_within(filled - keep .. filled, 0);
        base += (filled - keep) as u64;
        carried = keep;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn haystack(len: usize, tag_at: usize) -> Vec<u8> {
        let mut v = vec![0xAAu8; len];
        v[tag_at..tag_at + 4].copy_from_slice(b"XSPD");
        v
    }

    #[test]
    fn tag_at_chunk_boundary() {
        let v = haystack(64, 16);
        assert_eq!(find_tag(Cursor::new(&v), b"XSPD", 16).unwrap(), Some(16));
    }

    #[test]
    fn tag_straddling_chunk_boundary() {
        for split in 1..4 {
            let v = haystack(64, 16 - split);
            let found = find_tag(Cursor::new(&v), b"XSPD", 16).unwrap();
            assert_eq!(found, Some(16 - split as u64));
        }
    }

    #[test]
    fn first_match_wins() {
        let mut v = haystack(64, 40);
        v[50..54].copy_from_slice(b"XSPD");
        assert_eq!(find_tag(Cursor::new(&v), b"XSPD", 7).unwrap(), Some(40));
    }

    #[test]
    fn missing_tag() {
        let v = vec![b'X'; 100];
        assert_eq!(find_tag(Cursor::new(&v), b"XSPD", 16).unwrap(), None);
        assert_eq!(find_tag(Cursor::new(&[] as &[u8]), b"XSPD", 16).unwrap(), None);
    }

    #[test]
    fn find_block_in_file() {
        use std::io::Write;

        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&haystack(1000, 777)).unwrap();
        assert_eq!(find_block(f.path()).unwrap(), 777);

        let mut g = tempfile::NamedTempFile::new().unwrap();
        g.write_all(&[0u8; 100]).unwrap();
        match *find_block(g.path()).unwrap_err().kind() {
            ErrorKind::BlockNotFound(ref tag) => assert_eq!(tag, "XSPD"),
            ref k => panic!("wrong error: {:?}", k),
        }
    }
}
