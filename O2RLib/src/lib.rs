#![allow(non_snake_case)]
//! # O2RLib
//!
//! A pure-Rust library for working with `.o2r` / `.otr` resource archives used
//! by Ship of Harkinian and other libultraship ports.
//!
//! ## Supported Formats
//!
//! - **O2R/OTR archives** - Read, write, extract, pack and reorganize resources
//! - **Resource headers** - The 64-byte header and resource type registry
//! - **Animations** - Link (split header/data) and Actor animations, to and
//!   from decomp-style C source
//! - **Message tables** - Binary tables and an editable text form with
//!   control codes
//! - **Textures** - Direct color, grayscale and palette formats to RGBA/PNG
//!
//! ## Quick Start
//!
//! ### Working with Archives
//!
//! ```no_run
//! use o2rlib::archive::{ArchiveWriteOptions, move_resource, read_o2r_file, write_o2r_file};
//!
//! let resources = read_o2r_file("mod.o2r")?;
//! println!("Found {} resources", resources.len());
//!
//! let moved = move_resource(&resources, "objects/old/gAnim", "objects/new/gAnim")?;
//! write_o2r_file("mod_moved.o2r", &moved, &ArchiveWriteOptions::default())?;
//! # Ok::<(), o2rlib::Error>(())
//! ```
//!
//! ### Converting Animations
//!
//! ```no_run
//! use o2rlib::archive::{find_resource, read_o2r_file};
//! use o2rlib::formats::animation::{CSourceOptions, animation_to_c, parse_animation_from_resource};
//!
//! let resources = read_o2r_file("mod.o2r")?;
//! if let Some(resource) = find_resource(&resources, "misc/link_animation/gPlayerAnim_link_normal_wait") {
//!     let anim = parse_animation_from_resource(resource, &resources)?;
//!     println!("{}", animation_to_c(&anim, &CSourceOptions::default()));
//! }
//! # Ok::<(), o2rlib::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use o2rlib::prelude::*;
//!
//! // Now you have access to:
//! // - ResourceEntry, ResourceHeader, ResourceType
//! // - AnimationEntry, MessageTable, TextureData
//! // - Error, Result, and more
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `o2rlib` command-line binary

pub mod archive;
pub mod error;
pub mod formats;
pub mod resource;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    // Resources and archives
    pub use crate::archive::{
        ArchiveCompression, ArchiveWriteOptions, TreeNode, build_tree, move_resource,
        read_o2r, read_o2r_file, write_o2r, write_o2r_file,
    };
    pub use crate::resource::{
        ResourceEntry, ResourceHeader, ResourceType, create_resource, parse_header,
    };

    // Animations
    pub use crate::formats::animation::{
        ActorAnimation, AnimationEntry, AnimationKind, CSourceOptions, JointIndex, LinkAnimation,
        animation_to_c, parse_animation_from_c, parse_animation_from_resource,
    };

    // Messages
    pub use crate::formats::message::{
        MessageEntry, MessageTable, MessageText, editable_text_to_message_data,
        message_data_to_editable_text,
    };

    // Textures
    pub use crate::formats::texture::{TextureData, TextureType, decode_texture, parse_texture};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
