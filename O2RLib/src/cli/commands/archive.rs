//! CLI commands for archive-level operations

use std::path::Path;
use std::time::Instant;

use indexmap::IndexMap;

use super::{load, require, save};
use crate::archive::{
    ArchiveCompression, ArchiveWriteOptions, TreeNode, build_tree, extract_to_dir, move_resource,
    pack_dir, render_tree, tree::build_tree_from_paths, write_o2r_file,
};
use crate::cli::progress::{READ, UNPACK, WRITE, print_done, print_step, resource_bar};
use crate::utils::format_hex;

pub fn list(source: &Path, tree: bool, filter: Option<&str>, count: bool) -> anyhow::Result<()> {
    let resources = load(source)?;
    let matching: Vec<_> = resources
        .iter()
        .filter(|r| filter.is_none_or(|f| r.path().contains(f)))
        .collect();

    if count {
        println!("{}", matching.len());
        return Ok(());
    }

    if tree {
        let root = build_tree_from_paths(matching.iter().map(|r| r.path()));
        print!("{}", render_tree(&root));
        return Ok(());
    }

    println!("{:<18}  {:>10}  PATH", "TYPE", "SIZE");
    for resource in &matching {
        println!(
            "{:<18}  {:>10}  {}",
            resource.resource_type().name(),
            resource.data().len(),
            resource.path()
        );
    }
    println!();
    println!("{} resources", matching.len());

    Ok(())
}

pub fn info(source: &Path, path: Option<&str>) -> anyhow::Result<()> {
    let resources = load(source)?;

    if let Some(path) = path {
        let resource = require(&resources, path)?;
        let header = resource.header();
        println!("Resource: {}", resource.path());
        println!();
        println!("Type: {} ({})", header.resource_type, header.resource_type.tag());
        println!("Version: {}", header.resource_version);
        println!("Unique ID: 0x{:016X}", header.unique_id);
        println!("Custom: {}", header.is_custom);
        println!("Endianness: {}", header.endianness);
        println!("Size: {}", resource.description());
        return Ok(());
    }

    let mut by_type: IndexMap<&'static str, (usize, usize)> = IndexMap::new();
    for resource in &resources {
        let entry = by_type.entry(resource.resource_type().name()).or_default();
        entry.0 += 1;
        entry.1 += resource.data().len();
    }
    by_type.sort_by(|_, a, _, b| b.0.cmp(&a.0));

    println!("Archive: {}", source.display());
    println!();
    println!("Resources: {}", resources.len());
    println!("Folders: {}", folder_count(&build_tree(&resources)));
    println!();
    println!("{:<18}  {:>6}  {:>12}", "TYPE", "COUNT", "BYTES");
    for (name, (count, bytes)) in &by_type {
        println!("{name:<18}  {count:>6}  {bytes:>12}");
    }

    Ok(())
}

fn folder_count(node: &TreeNode) -> usize {
    node.children
        .iter()
        .filter(|c| c.is_directory)
        .map(|c| 1 + folder_count(c))
        .sum()
}

pub fn hex(source: &Path, path: &str, payload: bool, limit: Option<usize>) -> anyhow::Result<()> {
    let resources = load(source)?;
    let resource = require(&resources, path)?;

    let data = if payload {
        resource.payload()
    } else {
        resource.data()
    };
    let shown = limit.map_or(data.len(), |l| l.min(data.len()));

    print!("{}", format_hex(&data[..shown]));
    if shown < data.len() {
        println!("... {} more bytes", data.len() - shown);
    }

    Ok(())
}

pub fn extract(source: &Path, destination: &Path, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 2, READ, &format!("Reading {}...", source.display()));
    let resources = load(source)?;

    print_step(2, 2, UNPACK, &format!("Extracting to {}...", destination.display()));
    let pb = resource_bar(resources.len(), "Extracting", quiet);
    let mut written = 0;
    for resource in &resources {
        pb.set_message(resource.path().to_string());
        written += extract_to_dir(std::slice::from_ref(resource), destination)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    print_done(written, start.elapsed());
    Ok(())
}

pub fn pack(source: &Path, destination: &Path, compression: &str) -> anyhow::Result<()> {
    let compression = match compression.to_lowercase().as_str() {
        "deflated" | "deflate" => ArchiveCompression::Deflated,
        "stored" | "none" => ArchiveCompression::Stored,
        other => {
            anyhow::bail!(
                "Unknown compression method: '{}'. Valid options: deflated, stored",
                other
            );
        }
    };
    let start = Instant::now();

    print_step(1, 2, READ, &format!("Scanning {}...", source.display()));
    let resources = pack_dir(source)?;

    print_step(
        2,
        2,
        WRITE,
        &format!(
            "Writing {} resources ({})...",
            resources.len(),
            compression.as_str()
        ),
    );
    let options = ArchiveWriteOptions::new().with_compression(compression);
    write_o2r_file(destination, &resources, &options)?;

    println!("Archive created: {}", destination.display());
    print_done(resources.len(), start.elapsed());
    Ok(())
}

pub fn move_cmd(source: &Path, from: &str, to: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let resources = load(source)?;
    let moved = move_resource(&resources, from, to)?;
    println!("Moved {from} -> {to}");
    save(source, output, &moved)
}
