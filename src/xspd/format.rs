//! Layout parameters that differ between game releases.
//!
//! Both PS1 Harry Potter games store models in XSPD blocks, but not quite in
//! the same way. The parts known (or suspected) to differ are collected in
//! `Format` so the decoders don't have to branch on the release.

use std::fmt;
use std::str::FromStr;

/// Zero bytes following the three extended counts in a model header in
/// Philosopher's Stone.
pub const DEFAULT_HEADER_PADDING: usize = 6;

/// Decides where one vertex group ends and the next begins.
///
/// Every vertex and normal record carries a u16 sentinel. A record whose
/// sentinel equals `new_group_sentinel` is the last record of its group; the
/// record after it starts a new one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GroupBoundary {
    pub new_group_sentinel: u16,
}

impl GroupBoundary {
    pub fn ends_group(&self, sentinel: u16) -> bool {
        sentinel == self.new_group_sentinel
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Release {
    /// Harry Potter and the Philosopher's Stone. Groups end on sentinel 0.
    Hp1,
    /// Harry Potter and the Chamber of Secrets. Groups end on sentinel 1;
    /// the header padding is assumed to match HP1 but that's unconfirmed.
    Hp2,
}

impl FromStr for Release {
    type Err = String;

    fn from_str(s: &str) -> Result<Release, String> {
        match s {
            "hp1" => Ok(Release::Hp1),
            "hp2" => Ok(Release::Hp2),
            _ => Err(format!("unknown release {:?}, should be one of: hp1 hp2", s)),
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Release::Hp1 => write!(f, "hp1"),
            Release::Hp2 => write!(f, "hp2"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Format {
    /// Zero bytes after the extended counts in each model header.
    pub header_padding: usize,
    pub group_boundary: GroupBoundary,
}

impl Format {
    pub fn for_release(release: Release) -> Format {
        let new_group_sentinel = match release {
            Release::Hp1 => 0,
            Release::Hp2 => 1,
        };
        Format {
            header_padding: DEFAULT_HEADER_PADDING,
            group_boundary: GroupBoundary { new_group_sentinel },
        }
    }
}

impl Default for Format {
    fn default() -> Format {
        Format::for_release(Release::Hp1)
    }
}

#[test]
fn test_release_presets() {
    let hp1 = Format::for_release("hp1".parse().unwrap());
    assert_eq!(hp1.header_padding, 6);
    assert!(hp1.group_boundary.ends_group(0));
    assert!(!hp1.group_boundary.ends_group(1));

    let hp2 = Format::for_release("hp2".parse().unwrap());
    assert!(hp2.group_boundary.ends_group(1));
    assert!(!hp2.group_boundary.ends_group(0));

    assert!("hp3".parse::<Release>().is_err());
    assert_eq!(Format::default(), hp1);
}
