//! Error types for `O2RLib`

use thiserror::Error;

/// The error type for `O2RLib` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A buffer ended before a declared field could be read.
    #[error("truncated data while reading {context}: need {needed} bytes, {available} available")]
    Truncated {
        /// What was being read when the buffer ran out.
        context: &'static str,
        /// Bytes required by the field.
        needed: usize,
        /// Bytes remaining in the buffer.
        available: usize,
    },

    // ==================== Archive / Header Errors ====================
    /// ZIP container error from the archive backend.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Resource data is shorter than the fixed 64-byte header.
    #[error("data too small for resource header (need 64 bytes, got {0})")]
    HeaderTooShort(usize),

    /// The FourCC at offset 4 is not in the resource type registry.
    #[error("unrecognized resource type tag: {0:?}")]
    UnknownResourceType(String),

    /// A resource type name (or tag) that the registry does not know.
    #[error("unknown resource type name: {0}")]
    UnknownResourceTypeName(String),

    /// A FourCC string is not exactly four ASCII characters.
    #[error("FourCC must be exactly 4 ASCII characters, got {0:?}")]
    InvalidFourCC(String),

    /// No resource with the given path exists in the collection.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    // ==================== Animation Errors ====================
    /// A Link animation header names a data resource that is not present.
    #[error("could not find data file for Link animation. Expected path: {path}")]
    LinkDataNotFound {
        /// The data path embedded in the Link header.
        path: String,
    },

    /// The Link header payload is malformed.
    #[error("invalid Link animation header: {0}")]
    InvalidLinkHeader(String),

    /// The resource was expected to be a Link animation header.
    #[error("resource is not a Link animation header: {0}")]
    NotALinkAnimation(String),

    /// C source contains neither `LinkAnimationHeader` nor `AnimationHeader`.
    #[error("invalid C source format - could not detect animation type")]
    AnimationTypeNotDetected,

    /// Only the Link data array half of a split animation was supplied.
    #[error("file contains only Link animation data array - header file needed")]
    LinkDataOnly,

    /// Only the Link header half of a split animation was supplied.
    #[error("file contains only Link animation header - data file needed")]
    LinkHeaderOnly,

    /// Actor animation source has no `s16` frame data array.
    #[error("file contains no frame data array - s16 array needed")]
    ActorFrameDataMissing,

    /// Actor animation source has no `JointIndex` array.
    #[error("file contains no joint indices - JointIndex array needed")]
    ActorJointIndicesMissing,

    /// Actor animation source has no `AnimationHeader` declaration.
    #[error("file contains no AnimationHeader declaration")]
    ActorHeaderMissing,

    /// A C source file does not contain the expected declaration.
    #[error("invalid {part} - could not find {expected} declaration")]
    InvalidCSource {
        /// Which input was being parsed ("data file", "header file", ...).
        part: &'static str,
        /// The declaration that was expected.
        expected: &'static str,
    },

    /// Declared array sizes disagree with the actual element count.
    #[error("{array} declares {declared} elements but contains {actual}")]
    ArrayCountMismatch {
        /// Name of the C array.
        array: String,
        /// Count from the `[N]` declarator.
        declared: usize,
        /// Number of parsed elements.
        actual: usize,
    },

    /// A numeric literal in C source is out of range for its field.
    #[error("value {value} out of range for {field}")]
    ValueOutOfRange {
        /// The offending literal.
        value: String,
        /// The field being parsed.
        field: &'static str,
    },

    /// An Actor animation must carry frame data and joint indices.
    #[error("actor animation must have at least one frame value and one joint index")]
    EmptyActorAnimation,

    /// Actor animations need frame data, joint indices and header sources.
    #[error("actor animations require frame data, joint indices, and header files")]
    ActorNeedsThreeSources,

    // ==================== Texture Errors ====================
    /// Texture payload is shorter than the 16-byte sub-header.
    #[error("texture data too small for sub-header (need 16 bytes, got {0})")]
    TextureTooShort(usize),

    /// Texture pixel payload is smaller than the format requires.
    #[error("insufficient pixel data for {format}: need {needed} bytes, got {available}")]
    TextureDataTooShort {
        /// Texture format name.
        format: &'static str,
        /// Bytes required for `width * height` pixels.
        needed: usize,
        /// Bytes present.
        available: usize,
    },

    /// Declared texture dimensions overflow the addressable size.
    #[error("texture dimensions too large: {width}x{height}")]
    TextureTooLarge {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Texture type value outside the known formats.
    #[error("unsupported or unimplemented texture type: {0}")]
    UnknownTextureType(u32),

    /// A palette-indexed texture was decoded without a palette.
    #[error("palette texture requires a palette")]
    PaletteRequired,

    /// The supplied palette is not a direct-color texture.
    #[error("unsupported palette format: {0}")]
    UnsupportedPaletteFormat(String),

    /// Failed to encode PNG image.
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    // ==================== Parsing Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

impl Error {
    /// Build a [`Error::Truncated`] for a field of `needed` bytes.
    #[must_use]
    pub fn truncated(context: &'static str, needed: usize, available: usize) -> Self {
        Error::Truncated {
            context,
            needed,
            available,
        }
    }
}

/// A specialized Result type for `O2RLib` operations.
pub type Result<T> = std::result::Result<T, Error>;
