//! CLI commands for texture resources

use std::path::Path;

use super::{load, require};
use crate::formats::texture::{palette_candidates, parse_texture_resource, texture_to_png};

pub fn info(source: &Path, path: &str) -> anyhow::Result<()> {
    let resources = load(source)?;
    let resource = require(&resources, path)?;
    let texture = parse_texture_resource(resource)?;

    println!("Texture: {}", resource.path());
    println!();
    println!("Format: {}", texture.texture_type);
    println!("Dimensions: {}x{}", texture.width, texture.height);
    println!("Data size: {} bytes", texture.pixel_data.len());

    if texture.texture_type.needs_palette() {
        let candidates = palette_candidates(&resources, path);
        if candidates.is_empty() {
            println!("Palette: none found in folder");
        } else {
            println!("Palette candidates:");
            for candidate in candidates {
                println!("  {}", candidate.path());
            }
        }
    }
    Ok(())
}

pub fn png(source: &Path, path: &str, output: &Path, palette: Option<&str>) -> anyhow::Result<()> {
    let resources = load(source)?;
    let resource = require(&resources, path)?;
    let texture = parse_texture_resource(resource)?;

    let palette_resource = if texture.texture_type.needs_palette() {
        match palette {
            Some(p) => Some(require(&resources, p)?),
            None => palette_candidates(&resources, path).into_iter().next(),
        }
    } else {
        None
    };
    let palette_texture = palette_resource.map(parse_texture_resource).transpose()?;
    if let Some(p) = palette_resource {
        tracing::info!("Using palette {}", p.path());
    }

    let png = texture_to_png(&texture, palette_texture.as_ref())?;
    std::fs::write(output, png)?;
    println!(
        "Wrote {}x{} {} to {}",
        texture.width,
        texture.height,
        texture.texture_type,
        output.display()
    );
    Ok(())
}
