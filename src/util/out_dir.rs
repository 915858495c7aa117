use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::errors::{Result, ResultExt};

/// Directory for putting output files in. Will be created lazily when the first
/// file is created.
pub struct OutDir {
    path: PathBuf,
    created: bool,
}

impl OutDir {
    pub fn new(path: PathBuf) -> OutDir {
        OutDir { path, created: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn create_file(&mut self, filename: &str) -> Result<fs::File> {
        if !self.created {
            match fs::create_dir_all(&self.path) {
                Ok(()) => (),
                Err(ref e) if e.kind() == ErrorKind::AlreadyExists => (),
                Err(e) => {
                    return Err(e).chain_err(||
                        format!("couldn't create output directory {}", self.path.display()));
                }
            }
            self.created = true;
        }
        let path = self.path.join(filename);
        fs::File::create(&path)
            .chain_err(|| format!("couldn't create {}", path.display()))
    }
}

#[test]
fn test_lazy_create() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out");
    let mut out_dir = OutDir::new(path.clone());
    assert!(!path.exists());
    out_dir.create_file("a.obj").unwrap();
    out_dir.create_file("b.obj").unwrap();
    assert!(path.join("a.obj").exists());
    assert!(path.join("b.obj").exists());
}
