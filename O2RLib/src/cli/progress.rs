//! Step lines and progress bars for archive commands

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

/// Reading an archive or scanning a directory
pub static READ: Emoji<'_, '_> = Emoji("📂 ", "");
/// Unpacking resources to disk
pub static UNPACK: Emoji<'_, '_> = Emoji("📦 ", "");
/// Writing an archive
pub static WRITE: Emoji<'_, '_> = Emoji("💾 ", "");
static DONE: Emoji<'_, '_> = Emoji("✨ ", "");

/// `[1/2] 📂 Reading archive...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// `✨ 312 resources in 2 seconds`
pub fn print_done(resources: usize, elapsed: Duration) {
    println!(
        "{}{} resources in {}",
        DONE,
        style(resources).bold(),
        HumanDuration(elapsed)
    );
}

/// Per-resource bar; the message slot shows the current resource path.
#[must_use]
pub fn resource_bar(total: usize, verb: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:>10} [{bar:32.green/black}] {pos}/{len} {wide_msg:.dim}")
            .expect("valid template")
            .progress_chars("=> "),
    );
    pb.set_prefix(verb.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_bar_is_hidden() {
        assert!(resource_bar(3, "Extracting", true).is_hidden());
    }
}
