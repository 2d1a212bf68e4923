//! ZIP packaging of a staged mod folder

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::Path;

use skincore::utils::relative_path;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{Error, Result};

/// Zip every file below `source_dir` into a new archive at `zip_path`
///
/// Entry names are relative to `source_dir` with forward slashes, and every
/// entry is deflated. The archive is opened with create-new semantics: an
/// existing file is never overwritten. A partially written archive is
/// removed on failure.
///
/// Returns the number of files written.
pub fn zip_folder<P: AsRef<Path>, Q: AsRef<Path>>(source_dir: P, zip_path: Q) -> Result<usize> {
    let source_dir = source_dir.as_ref();
    let zip_path = zip_path.as_ref();

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(zip_path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::OutputCollision(zip_path.to_path_buf()),
            _ => Error::Io(e),
        })?;

    match write_archive(source_dir, file) {
        Ok(count) => {
            tracing::info!("Wrote {count} files to {}", zip_path.display());
            Ok(count)
        }
        Err(e) => {
            let _ = fs::remove_file(zip_path);
            Err(e)
        }
    }
}

fn write_archive(source_dir: &Path, file: File) -> Result<usize> {
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0;

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = relative_path(entry.path(), source_dir)
            .ok_or_else(|| Error::InvalidPath(entry.path().display().to_string()))?;

        tracing::debug!("Adding {name}");
        zip.start_file(name, options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn staged(root: &Path) {
        fs::create_dir_all(root.join("vehicles/pickup/red")).unwrap();
        fs::write(root.join("vehicles/pickup/red/skin.materials.json"), "{}").unwrap();
        fs::write(root.join("info.json"), "{\"name\": \"x\"}").unwrap();
    }

    #[test]
    fn test_entries_use_forward_slashes_and_deflate() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("staging");
        staged(&source);
        let zip_path = temp.path().join("mod.zip");

        assert_eq!(zip_folder(&source, &zip_path).unwrap(), 2);

        let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(names, vec!["info.json", "vehicles/pickup/red/skin.materials.json"]);

        let mut info = archive.by_name("info.json").unwrap();
        assert_eq!(info.compression(), CompressionMethod::Deflated);
        let mut content = String::new();
        info.read_to_string(&mut content).unwrap();
        assert_eq!(content, "{\"name\": \"x\"}");
    }

    #[test]
    fn test_existing_archive_is_collision() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("staging");
        staged(&source);
        let zip_path = temp.path().join("mod.zip");
        fs::write(&zip_path, "keep me").unwrap();

        assert!(matches!(
            zip_folder(&source, &zip_path),
            Err(Error::OutputCollision(_))
        ));
        assert_eq!(fs::read_to_string(&zip_path).unwrap(), "keep me");
    }
}
