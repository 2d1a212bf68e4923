//! CLI commands for building skin mods

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::Studio;
use crate::build::{BuildReport, SkinRequest};
use crate::cli::progress::{LOOKING_GLASS, PACKAGE, build_bar, print_done, print_step, print_warning, update_build_bar};

/// Arguments describing the single skin of `build`
pub struct SingleArgs<'a> {
    pub vehicle: &'a str,
    pub skin_name: &'a str,
    pub texture: &'a Path,
    pub preview: Option<&'a Path>,
    pub config_json: Option<&'a Path>,
}

/// Mod-level arguments shared by `build` and `batch`
pub struct ModArgs<'a> {
    pub mod_name: &'a str,
    pub author: Option<&'a str>,
    pub output: Option<&'a Path>,
    pub show_progress: bool,
}

/// Build a single skin mod
pub fn single(studio: &Studio, skin: &SingleArgs, args: &ModArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut request = SkinRequest::new(skin.vehicle, skin.skin_name, skin.texture);
    if let Some(preview) = skin.preview {
        request = request.with_preview(preview);
    }
    if let Some(path) = skin.config_json {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        request = request.with_config(serde_json::from_str(&text)?);
    }

    let options = studio.build_options(args.mod_name, args.author, args.output)?;
    print_step(1, 1, PACKAGE, &format!("Building {}...", args.mod_name));

    let report = if args.show_progress {
        let pb = build_bar();
        let result = studio.build_single(&request, &options, &|p| update_build_bar(&pb, p));
        pb.finish_and_clear();
        result?
    } else {
        studio.build_single(&request, &options, &|_| {})?
    };

    print_report(&report);
    print_done(start.elapsed());
    Ok(())
}

/// Build a multi skin mod from a JSON list of skin requests
///
/// Relative texture and preview paths in the list are resolved against the
/// list's own directory.
pub fn batch(studio: &Studio, requests_path: &Path, args: &ModArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    print_step(1, 2, LOOKING_GLASS, &format!("Reading {}...", requests_path.display()));
    let text = std::fs::read_to_string(requests_path)
        .with_context(|| format!("reading {}", requests_path.display()))?;
    let mut requests: Vec<SkinRequest> = serde_json::from_str(&text)
        .with_context(|| format!("parsing skin requests in {}", requests_path.display()))?;

    if let Some(base) = requests_path.parent() {
        for request in &mut requests {
            request.texture_path = base.join(&request.texture_path);
            request.preview_image_path = request.preview_image_path.take().map(|p| base.join(p));
        }
    }

    let options = studio.build_options(args.mod_name, args.author, args.output)?;
    print_step(
        2,
        2,
        PACKAGE,
        &format!("Building {} with {} skin(s)...", args.mod_name, requests.len()),
    );

    let report = if args.show_progress {
        let pb = build_bar();
        let result = studio.build_multi(&requests, &options, &|p| update_build_bar(&pb, p));
        pb.finish_and_clear();
        result?
    } else {
        studio.build_multi(&requests, &options, &|_| {})?
    };

    print_report(&report);
    print_done(start.elapsed());
    Ok(())
}

fn print_report(report: &BuildReport) {
    for warning in &report.warnings {
        print_warning(warning);
    }
    println!(
        "Created {} ({} skin(s), {} file(s))",
        report.archive_path.display(),
        report.skins_built.len(),
        report.file_count
    );
    if !report.skins_skipped.is_empty() {
        println!("Skipped: {}", report.skins_skipped.join(", "));
    }
}
