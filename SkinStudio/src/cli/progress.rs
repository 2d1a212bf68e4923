//! CLI progress display utilities

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::build::BuildProgress;

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Package - for packaging operations
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Gear - for processing operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Car - for vehicle operations
pub static CAR: Emoji<'_, '_> = Emoji("🚗 ", "");

/// Print a step indicator: `[1/3] 📦 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Print a warning line in yellow
pub fn print_warning(msg: &str) {
    println!("  {} {}", style("!").yellow().bold(), style(msg).yellow());
}

/// Progress bar style with percentage
///
/// Format: `Packaging archive [████████░░░░░░░░] 50% (4/8)`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style_with_percent() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg:<28} [{bar:40.cyan/blue}] {percent}% ({pos}/{len})")
        .expect("valid template")
}

/// Create a progress bar for a mod build
#[must_use]
pub fn build_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(bar_style_with_percent());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Forward a build progress update to `pb`
pub fn update_build_bar(pb: &ProgressBar, progress: &BuildProgress) {
    pb.set_length(progress.total as u64);
    pb.set_position(progress.current as u64);
    match &progress.current_skin {
        Some(skin) => pb.set_message(format!("{} {skin}", progress.phase.as_str())),
        None => pb.set_message(progress.phase.as_str()),
    }
}
