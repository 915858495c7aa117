use clap::ArgMatches;
use std::path::PathBuf;
use crate::errors::Result;
use crate::xspd::{Format, Release};

pub fn parse_cli_args() -> ArgMatches<'static> {
    clap_app!(xspd =>
        (@setting SubcommandRequiredElseHelp)
        (about: "Model/animation extractor for PS1 Harry Potter WAD files")
        (@arg VERBOSE: -v --verbose +multiple +global "Print more messages (repeat for even more)")
        (@subcommand info =>
            (about: "Print what's in the XSPD block of a WAD file")
            (alias: "i")
            (@arg INPUT: +required "WAD file")
            (@arg RELEASE: --release +takes_value possible_value[hp1 hp2] "Game release the WAD is from [default: hp1]")
            (@arg PADDING: --padding +takes_value "Zero bytes after the extended counts in model headers")
            (@arg SENTINEL: --sentinel +takes_value "Sentinel value that ends a vertex group")
        )
        (@subcommand convert =>
            (about: "Convert models (and posed animation frames) to .obj")
            (alias: "c")
            (@arg INPUT: +required "WAD file")
            (@arg OUTPUT: -o --output +takes_value +required "Output directory")
            (@arg MODEL: -m --model +takes_value "Only convert this model")
            (@arg ANIMATION: -a --animation +takes_value "Also write every frame of this animation")
            (@arg RELEASE: --release +takes_value possible_value[hp1 hp2] "Game release the WAD is from [default: hp1]")
            (@arg PADDING: --padding +takes_value "Zero bytes after the extended counts in model headers")
            (@arg SENTINEL: --sentinel +takes_value "Sentinel value that ends a vertex group")
        )
        (@subcommand image =>
            (about: "Convert a .IMG file to .png")
            (@arg INPUT: +required ".IMG file")
            (@arg OUTPUT: -o --output +takes_value +required "Output .png file")
            (@arg WIDTH: --width +takes_value requires[HEIGHT] "Image width [default: 512]")
            (@arg HEIGHT: --height +takes_value requires[WIDTH] "Image height [default: 256]")
            (@arg ALPHA: --alpha "Use the semi-transparency bit as an alpha mask")
        )
        (@subcommand version =>
            (about: "Print version info")
        )
    ).get_matches()
}

pub fn input_path(matches: &ArgMatches) -> PathBuf {
    PathBuf::from(matches.value_of_os("INPUT").unwrap_or_default())
}

/// Builds the decoding `Format` from --release and any overrides.
pub fn format_from_matches(matches: &ArgMatches) -> Result<Format> {
    let release = match matches.value_of("RELEASE") {
        Some(s) => s.parse::<Release>()?,
        None => Release::Hp1,
    };
    let mut format = Format::for_release(release);
    if let Some(s) = matches.value_of("PADDING") {
        format.header_padding = parse_num(s, "--padding")?;
    }
    if let Some(s) = matches.value_of("SENTINEL") {
        format.group_boundary.new_group_sentinel = parse_num(s, "--sentinel")?;
    }
    debug!("release {}, format {:?}", release, format);
    Ok(format)
}

/// Parses decimal or 0x-prefixed hex.
pub fn parse_num<T: ParseNum>(s: &str, what: &str) -> Result<T> {
    let res = if s.starts_with("0x") || s.starts_with("0X") {
        T::from_radix(&s[2..], 16)
    } else {
        T::from_radix(s, 10)
    };
    match res {
        Some(x) => Ok(x),
        None => bail!("bad number for {}: {:?}", what, s),
    }
}

pub trait ParseNum: Sized {
    fn from_radix(s: &str, radix: u32) -> Option<Self>;
}

macro_rules! def_parse_num {
    ($t:ty) => {
        impl ParseNum for $t {
            fn from_radix(s: &str, radix: u32) -> Option<$t> {
                <$t>::from_str_radix(s, radix).ok()
            }
        }
    }
}

def_parse_num!(u16);
def_parse_num!(u32);
def_parse_num!(usize);

#[test]
fn test_parse_num() {
    assert_eq!(parse_num::<u16>("1", "x").unwrap(), 1);
    assert_eq!(parse_num::<usize>("0x10", "x").unwrap(), 16);
    assert!(parse_num::<u16>("70000", "x").is_err());
    assert!(parse_num::<u32>("six", "x").is_err());
}
