//! Animation C source rendering and parsing
//!
//! The textual form is the narrow declaration subset decomp projects use:
//!
//! ```c
//! s16 gPlayerAnim_x_Data[] = { 0x0001, -0x0002, ... };
//! LinkAnimationHeader gPlayerAnim_x = { { 20 }, gPlayerAnim_x_Data };
//!
//! s16 gFooFrameData[3] = { ... };
//! JointIndex gFooJointIndices[2] = { { 0x0000, 0x0001, 0x0002, }, ... };
//! AnimationHeader gFoo = { { 10 }, gFooFrameData, gFooJointIndices, 2 };
//! ```
//!
//! Only these fixed shapes are recognized; this is pattern matching, not a
//! C parser. Values are rendered as four uppercase hex digits with a leading
//! `-` for negatives, which is also the only form the parser reads back.

use super::{ActorAnimation, AnimationEntry, AnimationKind, JointIndex, LINK_DATA_SUFFIX, LinkAnimation};
use crate::error::{Error, Result};
use regex::Regex;
use std::fmt::Write;

lazy_static::lazy_static! {
    static ref LINK_DATA_RE: Regex =
        Regex::new(r"s16\s+(\w+)\s*\[\s*\]\s*=\s*\{([^}]+)\}").expect("valid regex");
    static ref ACTOR_FRAME_DATA_RE: Regex =
        Regex::new(r"s16\s+(\w+)\s*\[\s*(\d*)\s*\]\s*=\s*\{([^}]+)\}").expect("valid regex");
    static ref HEX_VALUE_RE: Regex =
        Regex::new(r"-?0x[0-9A-Fa-f]+").expect("valid regex");
    static ref LINK_HEADER_RE: Regex =
        Regex::new(r"LinkAnimationHeader\s+(\w+)\s*=\s*\{\s*\{\s*(\d+)\s*\}\s*,\s*(\w+)")
            .expect("valid regex");
    static ref JOINT_INDICES_RE: Regex =
        Regex::new(r"JointIndex\s+(\w+)\s*\[\s*(\d*)\s*\]\s*=\s*\{([\s\S]+?)\};")
            .expect("valid regex");
    static ref JOINT_ENTRY_RE: Regex = Regex::new(
        r"\{\s*(0x[0-9A-Fa-f]+)\s*,\s*(0x[0-9A-Fa-f]+)\s*,\s*(0x[0-9A-Fa-f]+)\s*,?\s*\}"
    )
    .expect("valid regex");
    static ref ACTOR_HEADER_RE: Regex = Regex::new(
        r"AnimationHeader\s+(\w+)\s*=\s*\{\s*\{\s*(\d+)\s*\}\s*,\s*(\w+)\s*,\s*(\w+)\s*,\s*(\d+)\s*\}"
    )
    .expect("valid regex");
}

const LINK_HEADER_KEYWORD: &str = "LinkAnimationHeader";
const ACTOR_HEADER_KEYWORD: &str = "AnimationHeader";

// ============================================================================
// Options
// ============================================================================

/// Layout options for rendering C source.
#[derive(Debug, Clone)]
pub struct CSourceOptions {
    /// Values per line in `s16` arrays (minimum 1).
    pub values_per_line: usize,
    /// Emit the `#include` lines before Actor sources.
    pub include_prelude: bool,
}

impl Default for CSourceOptions {
    fn default() -> Self {
        Self {
            values_per_line: 8,
            include_prelude: true,
        }
    }
}

impl CSourceOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_values_per_line(mut self, values_per_line: usize) -> Self {
        self.values_per_line = values_per_line;
        self
    }

    #[must_use]
    pub fn with_prelude(mut self, include_prelude: bool) -> Self {
        self.include_prelude = include_prelude;
        self
    }
}

/// Parser options.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Reject sized arrays (`s16 x[N]`, `JointIndex y[N]`) whose element
    /// count differs from `N`.
    pub validate_counts: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_validate_counts(mut self, validate_counts: bool) -> Self {
        self.validate_counts = validate_counts;
        self
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Canonical hex form of a signed value: `0x0012`, `-0x0012`.
fn format_signed(value: i16) -> String {
    let value = i32::from(value);
    if value < 0 {
        format!("-0x{:04X}", -value)
    } else {
        format!("0x{value:04X}")
    }
}

fn write_values(out: &mut String, values: &[i16], per_line: usize) {
    let per_line = per_line.max(1);
    for (i, &value) in values.iter().enumerate() {
        if i % per_line == 0 {
            out.push_str("    ");
        }
        out.push_str(&format_signed(value));
        if i + 1 < values.len() {
            out.push_str(", ");
            if i % per_line == per_line - 1 {
                out.push('\n');
            }
        }
    }
}

/// Render a Link animation as data array plus `LinkAnimationHeader`.
#[must_use]
pub fn link_animation_to_c(anim: &LinkAnimation, options: &CSourceOptions) -> String {
    let data_name = format!("{}{LINK_DATA_SUFFIX}", anim.name);
    let mut out = String::new();

    let _ = writeln!(out, "s16 {data_name}[] = {{");
    write_values(&mut out, &anim.data, options.values_per_line);
    out.push_str("\n};\n\n");

    let _ = writeln!(out, "LinkAnimationHeader {} = {{ ", anim.name);
    let _ = writeln!(out, "    {{ {} }}, {data_name}", anim.frame_count);
    out.push_str("};\n");
    out
}

/// Render an Actor animation as frame data, joint indices and
/// `AnimationHeader`.
#[must_use]
pub fn actor_animation_to_c(anim: &ActorAnimation, options: &CSourceOptions) -> String {
    let frame_data_name = format!("{}FrameData", anim.name);
    let joint_indices_name = format!("{}JointIndices", anim.name);
    let mut out = String::new();

    if options.include_prelude {
        out.push_str("#include \"ultra64.h\"\n#include \"global.h\"\n\n");
    }

    let _ = writeln!(out, "s16 {frame_data_name}[{}] = {{", anim.frame_data.len());
    write_values(&mut out, &anim.frame_data, options.values_per_line);
    out.push_str("\n};\n\n");

    let _ = writeln!(out, "JointIndex {joint_indices_name}[{}] = {{", anim.joint_indices.len());
    for joint in &anim.joint_indices {
        let _ = writeln!(
            out,
            "    {{ 0x{:04X}, 0x{:04X}, 0x{:04X}, }},",
            joint.x, joint.y, joint.z
        );
    }
    out.push_str("};\n\n");

    let _ = writeln!(
        out,
        "AnimationHeader {} = {{ {{ {} }}, {frame_data_name}, {joint_indices_name}, {} }};",
        anim.name, anim.frame_count, anim.static_index_max
    );
    out
}

/// Render either variant with the given layout.
#[must_use]
pub fn animation_to_c(anim: &AnimationEntry, options: &CSourceOptions) -> String {
    match anim {
        AnimationEntry::Link(link) => link_animation_to_c(link, options),
        AnimationEntry::Actor(actor) => actor_animation_to_c(actor, options),
    }
}

// ============================================================================
// Parsing
// ============================================================================

struct ValueArray {
    name: String,
    declared: Option<usize>,
    values: Vec<i16>,
}

struct LinkHeaderDecl {
    name: String,
    frame_count: u16,
}

struct JointArray {
    name: String,
    declared: Option<usize>,
    indices: Vec<JointIndex>,
}

struct ActorHeaderDecl {
    name: String,
    frame_count: u16,
    static_index_max: u16,
}

/// Parse a hex literal into an `s16`. Positive literals up to `0xFFFF` wrap
/// into the negative range.
fn parse_s16(literal: &str) -> Result<i16> {
    let out_of_range = || Error::ValueOutOfRange {
        value: literal.to_string(),
        field: "s16 array value",
    };
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let digits = digits.trim_start_matches("0x").trim_start_matches("0X");
    let magnitude = i64::from_str_radix(digits, 16).map_err(|_| out_of_range())?;

    if negative {
        i16::try_from(-magnitude).map_err(|_| out_of_range())
    } else {
        u16::try_from(magnitude)
            .map(|v| v as i16)
            .map_err(|_| out_of_range())
    }
}

fn parse_u16_hex(literal: &str, field: &'static str) -> Result<u16> {
    let digits = literal.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| Error::ValueOutOfRange {
            value: literal.to_string(),
            field,
        })
}

fn parse_u16_decimal(literal: &str, field: &'static str) -> Result<u16> {
    literal.parse::<u16>().map_err(|_| Error::ValueOutOfRange {
        value: literal.to_string(),
        field,
    })
}

fn parse_declared(size: &str) -> Option<usize> {
    if size.is_empty() {
        None
    } else {
        size.parse().ok()
    }
}

fn parse_hex_values(content: &str) -> Result<Vec<i16>> {
    HEX_VALUE_RE
        .find_iter(content)
        .map(|m| parse_s16(m.as_str()))
        .collect()
}

/// `s16 name[] = { ... };` with an unsized declarator. An empty array is
/// accepted.
fn find_link_data(source: &str) -> Result<Option<ValueArray>> {
    let Some(caps) = LINK_DATA_RE.captures(source) else {
        return Ok(None);
    };
    Ok(Some(ValueArray {
        name: caps[1].to_string(),
        declared: None,
        values: parse_hex_values(&caps[2])?,
    }))
}

fn find_link_header(source: &str) -> Result<Option<LinkHeaderDecl>> {
    let Some(caps) = LINK_HEADER_RE.captures(source) else {
        return Ok(None);
    };
    Ok(Some(LinkHeaderDecl {
        name: caps[1].to_string(),
        frame_count: parse_u16_decimal(&caps[2], "frame count")?,
    }))
}

/// `s16 name[N] = { ... };`; requires at least one value.
fn find_actor_frame_data(source: &str) -> Result<Option<ValueArray>> {
    let Some(caps) = ACTOR_FRAME_DATA_RE.captures(source) else {
        return Ok(None);
    };
    let values = parse_hex_values(&caps[3])?;
    if values.is_empty() {
        return Ok(None);
    }
    Ok(Some(ValueArray {
        name: caps[1].to_string(),
        declared: parse_declared(&caps[2]),
        values,
    }))
}

/// `JointIndex name[N] = { {x, y, z, }, ... };`; requires at least one entry.
fn find_joint_indices(source: &str) -> Result<Option<JointArray>> {
    let Some(caps) = JOINT_INDICES_RE.captures(source) else {
        return Ok(None);
    };
    let indices = JOINT_ENTRY_RE
        .captures_iter(&caps[3])
        .map(|entry| {
            Ok(JointIndex {
                x: parse_u16_hex(&entry[1], "joint index x")?,
                y: parse_u16_hex(&entry[2], "joint index y")?,
                z: parse_u16_hex(&entry[3], "joint index z")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if indices.is_empty() {
        return Ok(None);
    }
    Ok(Some(JointArray {
        name: caps[1].to_string(),
        declared: parse_declared(&caps[2]),
        indices,
    }))
}

fn find_actor_header(source: &str) -> Result<Option<ActorHeaderDecl>> {
    let Some(caps) = ACTOR_HEADER_RE.captures(source) else {
        return Ok(None);
    };
    Ok(Some(ActorHeaderDecl {
        name: caps[1].to_string(),
        frame_count: parse_u16_decimal(&caps[2], "frame count")?,
        static_index_max: parse_u16_decimal(&caps[5], "static index max")?,
    }))
}

fn check_count(name: &str, declared: Option<usize>, actual: usize, options: &ParseOptions) -> Result<()> {
    match declared {
        Some(declared) if options.validate_counts && declared != actual => {
            Err(Error::ArrayCountMismatch {
                array: name.to_string(),
                declared,
                actual,
            })
        }
        _ => Ok(()),
    }
}

fn build_actor(
    frame_data: ValueArray,
    joints: JointArray,
    header: ActorHeaderDecl,
    options: &ParseOptions,
) -> Result<ActorAnimation> {
    check_count(&frame_data.name, frame_data.declared, frame_data.values.len(), options)?;
    check_count(&joints.name, joints.declared, joints.indices.len(), options)?;

    Ok(ActorAnimation {
        name: header.name,
        frame_count: header.frame_count,
        frame_data: frame_data.values,
        joint_indices: joints.indices,
        static_index_max: header.static_index_max,
    })
}

/// Detect which grammar a source follows from its header keyword.
///
/// Returns `None` when neither header type is named.
#[must_use]
pub fn detect_animation_kind(source: &str) -> Option<AnimationKind> {
    if source.contains(LINK_HEADER_KEYWORD) {
        Some(AnimationKind::Link)
    } else if source.contains(ACTOR_HEADER_KEYWORD) {
        Some(AnimationKind::Actor)
    } else {
        None
    }
}

/// Parse a complete animation from one C source with default options.
///
/// # Errors
///
/// See [`parse_animation_from_c_with_options`].
pub fn parse_animation_from_c(source: &str) -> Result<AnimationEntry> {
    parse_animation_from_c_with_options(source, &ParseOptions::default())
}

/// Parse a complete animation from one C source.
///
/// # Errors
///
/// - [`Error::LinkDataOnly`] / [`Error::LinkHeaderOnly`] when only one half
///   of a Link animation is present.
/// - [`Error::ActorFrameDataMissing`], [`Error::ActorJointIndicesMissing`] or
///   [`Error::ActorHeaderMissing`] for incomplete Actor sources.
/// - [`Error::AnimationTypeNotDetected`] when nothing recognizable is found.
/// - [`Error::ValueOutOfRange`] for literals that do not fit their field.
/// - [`Error::ArrayCountMismatch`] when count validation is enabled.
pub fn parse_animation_from_c_with_options(
    source: &str,
    options: &ParseOptions,
) -> Result<AnimationEntry> {
    match detect_animation_kind(source) {
        Some(AnimationKind::Link) => {
            let data = find_link_data(source)?;
            let header = find_link_header(source)?;
            match (data, header) {
                (Some(data), Some(header)) => Ok(AnimationEntry::Link(LinkAnimation {
                    name: header.name,
                    frame_count: header.frame_count,
                    data: data.values,
                })),
                (Some(_), None) => Err(Error::LinkDataOnly),
                (None, Some(_)) => Err(Error::LinkHeaderOnly),
                (None, None) => Err(Error::AnimationTypeNotDetected),
            }
        }
        Some(AnimationKind::Actor) => {
            let frame_data = find_actor_frame_data(source)?.ok_or(Error::ActorFrameDataMissing)?;
            let joints = find_joint_indices(source)?.ok_or(Error::ActorJointIndicesMissing)?;
            let header = find_actor_header(source)?.ok_or(Error::ActorHeaderMissing)?;
            build_actor(frame_data, joints, header, options).map(AnimationEntry::Actor)
        }
        // A bare unsized s16 array is the data half of a split Link source
        None if !source.contains("JointIndex") && find_link_data(source)?.is_some() => {
            Err(Error::LinkDataOnly)
        }
        None => Err(Error::AnimationTypeNotDetected),
    }
}

/// Combine a Link data source and a Link header source.
///
/// # Errors
///
/// Returns [`Error::InvalidCSource`] naming the file whose declaration is
/// missing.
pub fn combine_link_sources(data_source: &str, header_source: &str) -> Result<LinkAnimation> {
    let data = find_link_data(data_source)?.ok_or(Error::InvalidCSource {
        part: "data file",
        expected: "s16 array",
    })?;
    let header = find_link_header(header_source)?.ok_or(Error::InvalidCSource {
        part: "header file",
        expected: "LinkAnimationHeader",
    })?;

    Ok(LinkAnimation {
        name: header.name,
        frame_count: header.frame_count,
        data: data.values,
    })
}

/// Combine the three halves of an Actor animation with default options.
///
/// # Errors
///
/// See [`combine_actor_sources_with_options`].
pub fn combine_actor_sources(
    frame_data_source: &str,
    joint_indices_source: &str,
    header_source: &str,
) -> Result<ActorAnimation> {
    combine_actor_sources_with_options(
        frame_data_source,
        joint_indices_source,
        header_source,
        &ParseOptions::default(),
    )
}

/// Combine frame data, joint indices and header sources into an Actor
/// animation.
///
/// # Errors
///
/// Returns [`Error::InvalidCSource`] naming the file whose declaration is
/// missing, or [`Error::ArrayCountMismatch`] when count validation is on.
pub fn combine_actor_sources_with_options(
    frame_data_source: &str,
    joint_indices_source: &str,
    header_source: &str,
    options: &ParseOptions,
) -> Result<ActorAnimation> {
    let frame_data = find_actor_frame_data(frame_data_source)?.ok_or(Error::InvalidCSource {
        part: "frame data file",
        expected: "s16 array",
    })?;
    let joints = find_joint_indices(joint_indices_source)?.ok_or(Error::InvalidCSource {
        part: "joint indices file",
        expected: "JointIndex array",
    })?;
    let header = find_actor_header(header_source)?.ok_or(Error::InvalidCSource {
        part: "header file",
        expected: "AnimationHeader",
    })?;

    build_actor(frame_data, joints, header, options)
}

/// Combine a data source and a header source, detecting the type from the
/// header.
///
/// # Errors
///
/// Returns [`Error::ActorNeedsThreeSources`] unless the header is a
/// `LinkAnimationHeader`.
pub fn combine_sources(data_source: &str, header_source: &str) -> Result<AnimationEntry> {
    if header_source.contains(LINK_HEADER_KEYWORD) {
        combine_link_sources(data_source, header_source).map(AnimationEntry::Link)
    } else {
        Err(Error::ActorNeedsThreeSources)
    }
}
