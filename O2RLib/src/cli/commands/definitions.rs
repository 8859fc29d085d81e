//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

/// Animation resource commands
#[derive(Subcommand)]
pub enum AnimationCommands {
    /// Show a summary of an animation resource
    Show {
        /// Archive file
        source: PathBuf,

        /// Resource path of the animation (Link header or Actor animation)
        path: String,
    },

    /// Export an animation as C source
    #[command(name = "export-c")]
    ExportC {
        /// Archive file
        source: PathBuf,

        /// Resource path of the animation
        path: String,

        /// Output C file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Values per line in data arrays
        #[arg(long, default_value = "8")]
        values_per_line: usize,

        /// Omit the `#include` / `#define` prelude of Actor animations
        #[arg(long)]
        no_prelude: bool,
    },

    /// Import an animation from C source into an archive
    ///
    /// Pass one combined file, two files (Link data + header) or three
    /// files (Actor frame data + joint indices + header).
    #[command(name = "import-c")]
    ImportC {
        /// Archive file
        source: PathBuf,

        /// Resource path to store the animation at
        path: String,

        /// C source file(s)
        #[arg(required = true, num_args = 1..=3)]
        files: Vec<PathBuf>,

        /// Output archive (overwrites the source if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reject arrays whose declared size does not match their contents
        #[arg(long)]
        strict: bool,
    },
}

/// Message table commands
#[derive(Subcommand)]
pub enum MessageCommands {
    /// List messages with their previews
    List {
        /// Archive file
        source: PathBuf,

        /// Resource path of the message table
        path: String,

        /// Maximum messages to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export messages to JSON in editable text form
    Export {
        /// Archive file
        source: PathBuf,

        /// Resource path of the message table
        path: String,

        /// Output JSON file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace a message table from an edited JSON export
    Import {
        /// Archive file
        source: PathBuf,

        /// Resource path of the message table
        path: String,

        /// JSON file produced by `message export`
        input: PathBuf,

        /// Output archive (overwrites the source if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Texture resource commands
#[derive(Subcommand)]
pub enum TextureCommands {
    /// Show texture format and size
    Info {
        /// Archive file
        source: PathBuf,

        /// Resource path of the texture
        path: String,
    },

    /// Decode a texture to PNG
    Png {
        /// Archive file
        source: PathBuf,

        /// Resource path of the texture
        path: String,

        /// Output PNG file
        output: PathBuf,

        /// Palette texture path (defaults to the first TLUT in the same folder)
        #[arg(short, long)]
        palette: Option<String>,
    },
}
