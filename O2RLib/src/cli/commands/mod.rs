pub mod animation;
pub mod archive;
pub mod definitions;
pub mod message;
pub mod texture;

use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::archive::{ArchiveWriteOptions, find_resource, read_o2r_file, write_o2r_file};
use crate::resource::ResourceEntry;

pub use definitions::{AnimationCommands, MessageCommands, TextureCommands};

#[derive(Subcommand)]
pub enum Commands {
    /// List archive contents
    List {
        /// Archive file
        source: PathBuf,

        /// Show as an indented directory tree
        #[arg(short, long)]
        tree: bool,

        /// Only list resources whose path contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Only show count of matching resources
        #[arg(short, long)]
        count: bool,
    },

    /// Show archive statistics, or the header of one resource
    Info {
        /// Archive file
        source: PathBuf,

        /// Resource path to describe
        path: Option<String>,
    },

    /// Hex dump a resource
    Hex {
        /// Archive file
        source: PathBuf,

        /// Resource path
        path: String,

        /// Only dump the payload (skip the 64-byte header)
        #[arg(long)]
        payload: bool,

        /// Maximum number of bytes to dump
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Extract every resource to a directory
    Extract {
        /// Archive file
        source: PathBuf,

        /// Output directory
        destination: PathBuf,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Pack a directory of resources into an archive
    Pack {
        /// Source directory
        source: PathBuf,

        /// Output archive
        destination: PathBuf,

        /// Compression method (deflated, stored)
        #[arg(short, long, default_value = "deflated")]
        compression: String,
    },

    /// Move a resource to a new path (Link animations move with their data)
    Move {
        /// Archive file
        source: PathBuf,

        /// Current resource path
        from: String,

        /// New resource path
        to: String,

        /// Output archive (overwrites the source if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Animation operations (C source export/import)
    Animation {
        #[command(subcommand)]
        command: AnimationCommands,
    },

    /// Message table operations
    Message {
        #[command(subcommand)]
        command: MessageCommands,
    },

    /// Texture operations (info, PNG export)
    Texture {
        #[command(subcommand)]
        command: TextureCommands,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::List {
                source,
                tree,
                filter,
                count,
            } => archive::list(source, *tree, filter.as_deref(), *count),
            Commands::Info { source, path } => archive::info(source, path.as_deref()),
            Commands::Hex {
                source,
                path,
                payload,
                limit,
            } => archive::hex(source, path, *payload, *limit),
            Commands::Extract {
                source,
                destination,
                quiet,
            } => archive::extract(source, destination, *quiet),
            Commands::Pack {
                source,
                destination,
                compression,
            } => archive::pack(source, destination, compression),
            Commands::Move {
                source,
                from,
                to,
                output,
            } => archive::move_cmd(source, from, to, output.as_deref()),
            Commands::Animation { command } => command.execute(),
            Commands::Message { command } => command.execute(),
            Commands::Texture { command } => command.execute(),
        }
    }
}

impl AnimationCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            AnimationCommands::Show { source, path } => animation::show(source, path),
            AnimationCommands::ExportC {
                source,
                path,
                output,
                values_per_line,
                no_prelude,
            } => animation::export_c(
                source,
                path,
                output.as_deref(),
                *values_per_line,
                !*no_prelude,
            ),
            AnimationCommands::ImportC {
                source,
                path,
                files,
                output,
                strict,
            } => animation::import_c(source, path, files, output.as_deref(), *strict),
        }
    }
}

impl MessageCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            MessageCommands::List {
                source,
                path,
                limit,
            } => message::list(source, path, *limit),
            MessageCommands::Export {
                source,
                path,
                output,
            } => message::export(source, path, output.as_deref()),
            MessageCommands::Import {
                source,
                path,
                input,
                output,
            } => message::import(source, path, input, output.as_deref()),
        }
    }
}

impl TextureCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            TextureCommands::Info { source, path } => texture::info(source, path),
            TextureCommands::Png {
                source,
                path,
                output,
                palette,
            } => texture::png(source, path, output, palette.as_deref()),
        }
    }
}

/// Look up a resource or fail with [`crate::Error::ResourceNotFound`].
fn require<'a>(resources: &'a [ResourceEntry], path: &str) -> crate::Result<&'a ResourceEntry> {
    find_resource(resources, path).ok_or_else(|| crate::Error::ResourceNotFound(path.to_string()))
}

/// Insert `entry`, replacing any resource already at its path.
fn upsert(resources: &mut Vec<ResourceEntry>, entry: ResourceEntry) {
    match resources.iter_mut().find(|r| r.path() == entry.path()) {
        Some(existing) => *existing = entry,
        None => resources.push(entry),
    }
}

/// Write `resources` to `output`, or back over `source`.
fn save(source: &Path, output: Option<&Path>, resources: &[ResourceEntry]) -> anyhow::Result<()> {
    let target = output.unwrap_or(source);
    write_o2r_file(target, resources, &ArchiveWriteOptions::default())?;
    println!("Wrote {} resources to {}", resources.len(), target.display());
    Ok(())
}

fn load(source: &Path) -> anyhow::Result<Vec<ResourceEntry>> {
    Ok(read_o2r_file(source)?)
}
