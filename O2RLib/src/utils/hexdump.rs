//! Hex dump formatting for raw resource inspection

use std::fmt::Write;

/// Default number of bytes rendered per line.
pub const BYTES_PER_LINE: usize = 16;

/// Format bytes as a classic hex dump.
///
/// Each line is `oooooooo  xx xx .. xx  xx .. xx  |ascii|`, split into two
/// groups of eight. Bytes outside `0x20..=0x7E` show as `.` in the ASCII
/// column, and a short final line is padded so the columns stay aligned.
#[must_use]
pub fn format_hex(data: &[u8]) -> String {
    format_hex_with_width(data, BYTES_PER_LINE)
}

/// Format bytes as a hex dump with a custom line width.
#[must_use]
pub fn format_hex_with_width(data: &[u8], bytes_per_line: usize) -> String {
    let bytes_per_line = bytes_per_line.max(1);
    let half = bytes_per_line.div_ceil(2);
    let mut lines = Vec::with_capacity(data.len().div_ceil(bytes_per_line));

    for (line_idx, chunk) in data.chunks(bytes_per_line).enumerate() {
        let mut hex = Vec::with_capacity(bytes_per_line);
        let mut ascii = String::with_capacity(bytes_per_line);

        for i in 0..bytes_per_line {
            if let Some(&byte) = chunk.get(i) {
                hex.push(format!("{byte:02x}"));
                ascii.push(if (0x20..=0x7E).contains(&byte) {
                    char::from(byte)
                } else {
                    '.'
                });
            } else {
                hex.push("  ".to_string());
                ascii.push(' ');
            }
        }

        let mut line = String::new();
        let _ = write!(
            line,
            "{:08x}  {}  {}  |{}|",
            line_idx * bytes_per_line,
            hex[..half].join(" "),
            hex[half..].join(" "),
            ascii
        );
        lines.push(line);
    }

    lines.join("\n")
}
