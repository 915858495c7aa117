use clap::ArgMatches;
use crate::cli::{format_from_matches, input_path};
use crate::errors::Result;
use crate::xspd::animation::{Animation, AnimationFormat};
use crate::xspd::{Model, Xspd};

pub fn main(matches: &ArgMatches) -> Result<()> {
    let input = input_path(matches);
    let format = format_from_matches(matches)?;
    let xspd = Xspd::open(&input, format)?;

    let block = xspd.block();
    println!("XSPD block at {:#x} ({:#x} bytes)", block.offset, block.len());
    println!("Header padding: {}", xspd.format().header_padding);
    println!("New group sentinel: {}", xspd.format().group_boundary.new_group_sentinel);
    println!("Models: {}", xspd.num_models()?);
    println!();

    let models = xspd.models()?;
    for (i, model) in models.iter().enumerate() {
        model_info(i, model);
    }

    println!("Animations at {:#x}", xspd.animations_offset()?);
    let anims = xspd.animations()?;
    for (i, anim) in anims.iter().enumerate() {
        animation_info(i, anim, &models);
    }

    Ok(())
}

fn model_info(i: usize, model: &Model) {
    let num_tris = model.faces.iter().filter(|f| f.is_triangle()).count();
    let num_quads = model.faces.iter().filter(|f| f.distinct_verts().len() == 4).count();
    println!("Model {}:", i);
    println!("  Vertices: {}", model.verts.len());
    println!("  Faces: {} ({} triangles, {} quads)",
        model.faces.len(), num_tris, num_quads);
    println!("  Groups: {}", model.num_groups);
    let mut textures: Vec<u16> = model.faces.iter().map(|f| f.texture).collect();
    textures.sort();
    textures.dedup();
    println!("  Textures: {:?}", textures);
}

fn animation_info(i: usize, anim: &Animation, models: &[Model]) {
    println!("Animation {}:", i);
    match anim.format {
        AnimationFormat::Old => println!("  Format: old (matrices)"),
        AnimationFormat::New => println!("  Format: new (key-framed quaternions)"),
    }
    println!("  Frames: {} ({} stored)", anim.num_frames, anim.frames.len());
    if anim.format == AnimationFormat::New {
        let keys: Vec<u32> = anim.frames.iter().map(|f| f.index).collect();
        println!("  Key frames: {:?}", keys);
    }
    println!("  Groups: {}", anim.num_groups);
    let fits: Vec<usize> = models.iter().enumerate()
        .filter(|&(_, m)| m.num_groups == anim.num_groups)
        .map(|(i, _)| i)
        .collect();
    println!("  Models with matching groups: {:?}", fits);
}
