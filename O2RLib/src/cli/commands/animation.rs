//! CLI commands for animation resources

use std::path::{Path, PathBuf};

use super::{load, require, save, upsert};
use crate::formats::animation::{
    AnimationEntry, CSourceOptions, ParseOptions, actor_to_resource, animation_to_c,
    combine_actor_sources_with_options, combine_sources, parse_animation_from_c_with_options,
    parse_animation_from_resource, split_link_animation,
};
use crate::utils::path::{parent_folder, resource_name};

pub fn show(source: &Path, path: &str) -> anyhow::Result<()> {
    let resources = load(source)?;
    let resource = require(&resources, path)?;
    let anim = parse_animation_from_resource(resource, &resources)?;

    println!("{}", anim.preview());
    if let AnimationEntry::Actor(actor) = &anim {
        println!("Static index max: {}", actor.static_index_max);
    }
    Ok(())
}

pub fn export_c(
    source: &Path,
    path: &str,
    output: Option<&Path>,
    values_per_line: usize,
    include_prelude: bool,
) -> anyhow::Result<()> {
    let resources = load(source)?;
    let resource = require(&resources, path)?;
    let anim = parse_animation_from_resource(resource, &resources)?;

    let options = CSourceOptions::new()
        .with_values_per_line(values_per_line)
        .with_prelude(include_prelude);
    let c_source = animation_to_c(&anim, &options);

    match output {
        Some(out) => {
            std::fs::write(out, c_source)?;
            println!("Exported {} to {}", anim.preview(), out.display());
        }
        None => print!("{c_source}"),
    }
    Ok(())
}

pub fn import_c(
    source: &Path,
    path: &str,
    files: &[PathBuf],
    output: Option<&Path>,
    strict: bool,
) -> anyhow::Result<()> {
    let sources = files
        .iter()
        .map(std::fs::read_to_string)
        .collect::<std::io::Result<Vec<_>>>()?;
    let options = ParseOptions::new().with_validate_counts(strict);

    let mut anim = match sources.as_slice() {
        [single] => parse_animation_from_c_with_options(single, &options)?,
        [data, header] => combine_sources(data, header)?,
        [frames, joints, header] => AnimationEntry::Actor(combine_actor_sources_with_options(
            frames, joints, header, &options,
        )?),
        _ => anyhow::bail!("Expected 1 to 3 C source files, got {}", sources.len()),
    };

    let name = resource_name(path).to_string();
    match &mut anim {
        AnimationEntry::Link(link) => link.name = name,
        AnimationEntry::Actor(actor) => actor.name = name,
    }

    let mut resources = load(source)?;
    match &anim {
        AnimationEntry::Link(link) => {
            let split = split_link_animation(link, parent_folder(path))?;
            println!("Link data stored at {}", split.data.path());
            upsert(&mut resources, split.header);
            upsert(&mut resources, split.data);
        }
        AnimationEntry::Actor(actor) => {
            upsert(&mut resources, actor_to_resource(actor, path)?);
        }
    }

    println!("Imported {}", anim.preview());
    save(source, output, &resources)
}
