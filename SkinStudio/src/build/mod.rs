//! Mod assembly: stage skins from their templates, then package
//!
//! Every build stages into a fresh temporary directory which is removed when
//! the build returns, successfully or not. Per-file rewrite failures become
//! warnings in the [`BuildReport`]; a missing template is fatal to a single
//! skin build and skips the skin in a multi skin build.

mod types;

pub use types::{
    BuildOptions, BuildPhase, BuildProgress, BuildProgressCallback, BuildReport, SkinRequest,
};

use std::fs;
use std::path::{Path, PathBuf};

use skincore::SkinTarget;
use skincore::formats::info::ModInfo;
use skincore::formats::jbeam::{JbeamValues, rewrite_jbeam_file};
use skincore::formats::material::specialize_file;
use skincore::utils::sanitize_mod_name;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::package::zip_folder;
use crate::template::TemplateStore;

/// Prefix of the temporary staging directory
pub const STAGING_PREFIX: &str = "skinstudio_mod_";

/// Progress steps per skin (template, descriptors, extras)
const STEPS_PER_SKIN: usize = 3;

/// Whether a missing template aborts the build or skips the skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingTemplatePolicy {
    Abort,
    Skip,
}

/// Archive path for a mod name
#[must_use]
pub fn archive_path(output_dir: &Path, mod_name: &str) -> PathBuf {
    output_dir.join(format!("{}.zip", sanitize_mod_name(mod_name)))
}

/// Build a mod containing one skin
pub fn build_single_skin_mod(
    store: &TemplateStore,
    request: &SkinRequest,
    options: &BuildOptions,
) -> Result<BuildReport> {
    build_single_skin_mod_with_progress(store, request, options, &|_| {})
}

/// Build a mod containing one skin, with progress callback
///
/// # Errors
/// Fails with [`Error::MissingTemplate`] when the vehicle has no template and
/// with [`Error::OutputCollision`] when the archive already exists.
pub fn build_single_skin_mod_with_progress(
    store: &TemplateStore,
    request: &SkinRequest,
    options: &BuildOptions,
    progress: BuildProgressCallback,
) -> Result<BuildReport> {
    build_mod(
        store,
        std::slice::from_ref(request),
        options,
        MissingTemplatePolicy::Abort,
        progress,
    )
}

/// Build a mod containing several skins, possibly for several vehicles
pub fn build_multi_skin_mod(
    store: &TemplateStore,
    requests: &[SkinRequest],
    options: &BuildOptions,
) -> Result<BuildReport> {
    build_multi_skin_mod_with_progress(store, requests, options, &|_| {})
}

/// Build a mod containing several skins, with progress callback
///
/// Skins whose vehicle has no template are skipped with a warning. The
/// archive is produced even if every skin was skipped.
pub fn build_multi_skin_mod_with_progress(
    store: &TemplateStore,
    requests: &[SkinRequest],
    options: &BuildOptions,
    progress: BuildProgressCallback,
) -> Result<BuildReport> {
    build_mod(store, requests, options, MissingTemplatePolicy::Skip, progress)
}

fn build_mod(
    store: &TemplateStore,
    requests: &[SkinRequest],
    options: &BuildOptions,
    policy: MissingTemplatePolicy,
    progress: BuildProgressCallback,
) -> Result<BuildReport> {
    let archive = archive_path(&options.output_dir, &options.mod_name);
    if archive.exists() {
        return Err(Error::OutputCollision(archive));
    }

    let staging = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir()?;
    tracing::info!(
        "Building mod '{}' with {} skin(s) in {}",
        options.mod_name,
        requests.len(),
        staging.path().display()
    );

    let total = requests.len() * STEPS_PER_SKIN + 2;
    let mut report = BuildReport {
        archive_path: archive.clone(),
        ..BuildReport::default()
    };

    for (index, request) in requests.iter().enumerate() {
        let target = SkinTarget::new(&request.vehicle_id, &request.skin_name, &request.texture_path);
        let label = format!("{}/{}", target.vehicle_id, target.skin_id);
        let step = index * STEPS_PER_SKIN;

        let staged = stage_skin(store, staging.path(), request, &target, options, &mut report, &|phase, offset| {
            progress(&BuildProgress::with_skin(phase, step + offset, total, label.as_str()));
        });
        match staged {
            Ok(()) => {
                tracing::info!("Staged {label}");
                report.skins_built.push(label);
            }
            Err(e @ Error::MissingTemplate { .. }) if policy == MissingTemplatePolicy::Skip => {
                report.warn(format!("Skipping {label}: {e}"));
                report.skins_skipped.push(label);
            }
            Err(e) => return Err(e),
        }
    }

    progress(&BuildProgress::new(BuildPhase::WritingInfo, total - 2, total));
    let info = ModInfo::new(&options.mod_name, &options.author).with_version(&options.version);
    fs::write(staging.path().join("info.json"), info.to_json()?)?;

    progress(&BuildProgress::new(BuildPhase::Packaging, total - 1, total));
    fs::create_dir_all(&options.output_dir)?;
    report.file_count = zip_folder(staging.path(), &archive)?;

    progress(&BuildProgress::new(BuildPhase::Complete, total, total));
    tracing::info!(
        "Mod created at {} ({} built, {} skipped)",
        archive.display(),
        report.skins_built.len(),
        report.skins_skipped.len()
    );
    Ok(report)
}

/// Stage one skin into `staging`
fn stage_skin(
    store: &TemplateStore,
    staging: &Path,
    request: &SkinRequest,
    target: &SkinTarget,
    options: &BuildOptions,
    report: &mut BuildReport,
    step: &dyn Fn(BuildPhase, usize),
) -> Result<()> {
    if target.texture_file.is_empty() {
        return Err(Error::InvalidPath(format!(
            "texture path has no file name: {}",
            request.texture_path.display()
        )));
    }

    let template_dir = store.template_dir(&target.vehicle_id);
    if !template_dir.is_dir() {
        return Err(Error::MissingTemplate {
            vehicle_id: target.vehicle_id.clone(),
            path: template_dir,
        });
    }

    step(BuildPhase::CopyingTemplate, 0);
    let skin_dir = staging.join(target.skin_dir());
    copy_dir_contents(&template_dir, &skin_dir)?;
    fs::copy(&request.texture_path, skin_dir.join(&target.texture_file))?;

    step(BuildPhase::RewritingDescriptors, 1);
    rewrite_descriptors(&skin_dir, request, target, options, report)?;

    step(BuildPhase::CopyingExtras, 2);
    if let Some(preview) = &request.preview_image_path {
        if preview.is_file() {
            copy_preview(staging, preview, target)?;
        } else {
            report.warn(format!("Preview image not found: {}", preview.display()));
        }
    }

    if let Some(config) = &request.config_data {
        let config_dir = skin_dir.join("configs");
        fs::create_dir_all(&config_dir)?;
        let config_path = config_dir.join(format!("{}_config.json", target.skin_id));
        fs::write(&config_path, serde_json::to_string_pretty(config)?)?;
        tracing::debug!("Created config file: {}", config_path.display());
    }

    Ok(())
}

/// Rewrite the jbeam and material files of a staged skin
///
/// Failures are per file and land in the report as warnings.
fn rewrite_descriptors(
    skin_dir: &Path,
    request: &SkinRequest,
    target: &SkinTarget,
    options: &BuildOptions,
    report: &mut BuildReport,
) -> Result<()> {
    let values = JbeamValues {
        texture_id: &target.skin_id,
        display_name: &request.skin_name,
        author: &options.author,
    };

    for entry in WalkDir::new(skin_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            Some("jbeam") => {
                if let Err(e) = rewrite_jbeam_file(path, &values) {
                    report.warn(format!("{}: {e}", path.display()));
                }
            }
            Some("json") if !file_name.starts_with("info") => match specialize_file(path, target) {
                Ok(tier) => tracing::debug!("Specialized {file_name} ({} tier)", tier.as_str()),
                Err(e @ skincore::Error::PartialFieldFailure { .. }) => {
                    report.warn(format!("Partially specialized {e}"));
                }
                Err(e) => report.warn(format!("{}: {e}", path.display())),
            },
            _ => {}
        }
    }

    Ok(())
}

/// Copy the preview image to `imagesforgui/vehicles/<vehicle>/<skin id><ext>`
fn copy_preview(staging: &Path, preview: &Path, target: &SkinTarget) -> Result<()> {
    let preview_dir = staging
        .join("imagesforgui")
        .join("vehicles")
        .join(&target.vehicle_id);
    fs::create_dir_all(&preview_dir)?;

    let file_name = match preview.extension() {
        Some(ext) => format!("{}.{}", target.skin_id, ext.to_string_lossy()),
        None => target.skin_id.clone(),
    };
    fs::copy(preview, preview_dir.join(&file_name))?;
    tracing::debug!("Copied preview image as {file_name}");
    Ok(())
}

/// Recursively copy the contents of `source` into `dest`
fn copy_dir_contents(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| Error::InvalidPath(entry.path().display().to_string()))?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
