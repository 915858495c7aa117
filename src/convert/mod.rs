pub mod obj;

use clap::ArgMatches;
use std::io::Write;
use std::path::PathBuf;
use crate::cli::{format_from_matches, input_path};
use crate::errors::{ErrorKind, Result, ResultExt};
use crate::util::OutDir;
use crate::xspd::{apply_frame, Model, Xspd};

pub fn main(matches: &ArgMatches) -> Result<()> {
    let input = input_path(matches);
    let format = format_from_matches(matches)?;
    let xspd = Xspd::open(&input, format)?;

    let selected: Vec<(usize, Model)> = match matches.value_of("MODEL") {
        Some(n) => {
            let n = n.parse::<usize>()
                .chain_err(|| format!("bad model index {:?}", n))?;
            vec![(n, xspd.model(n)?)]
        }
        None => xspd.models()?.into_iter().enumerate().collect(),
    };

    let plural = |x| if x != 1 { "s" } else { "" };
    info!("Found {} model{}.", selected.len(), plural(selected.len()));

    let mut out_dir = OutDir::new(PathBuf::from(matches.value_of_os("OUTPUT").unwrap_or_default()));
    let mut s = String::new();

    for &(i, ref model) in &selected {
        write_obj(&mut out_dir, &mut s, &format!("model{}.obj", i), model)?;
    }

    if let Some(a) = matches.value_of("ANIMATION") {
        let a = a.parse::<usize>()
            .chain_err(|| format!("bad animation index {:?}", a))?;
        let anims = xspd.animations()?;
        let anim = match anims.get(a) {
            Some(anim) => anim,
            None => bail!("no animation {} (there are only {})", a, anims.len()),
        };
        info!("Posing with animation {} ({} frames).", a, anim.frames.len());

        for &(i, ref model) in &selected {
            for frame in &anim.frames {
                let posed = match apply_frame(model, frame) {
                    Ok(posed) => posed,
                    Err(e) => match *e.kind() {
                        // Only this model/animation pair is affected
                        ErrorKind::GroupMismatch(_) => {
                            warn!("can't pose model {} with animation {}: {}", i, a, e);
                            break;
                        }
                        _ => return Err(e),
                    },
                };
                let name = format!("model{}_anim{}_frame{}.obj", i, a, frame.index);
                write_obj(&mut out_dir, &mut s, &name, &posed)?;
            }
        }
    }

    info!("Wrote output to {}.", out_dir.path().display());
    Ok(())
}

fn write_obj(out_dir: &mut OutDir, s: &mut String, name: &str, model: &Model) -> Result<()> {
    s.clear();
    obj::write(s, model)?;
    let mut f = out_dir.create_file(name)?;
    f.write_all(s.as_bytes())
        .chain_err(|| format!("failed to write {}", name))?;
    debug!("wrote {}", name);
    Ok(())
}
