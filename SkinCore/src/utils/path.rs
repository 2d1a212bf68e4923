//! Path utilities

use std::path::Path;

/// Normalize path separators to forward slashes (for archive entry names)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_path)
}

/// File name of a path as an owned string, if it has one
pub fn file_name_string<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let base = PathBuf::from("staging");
        let file = base.join("vehicles").join("pickup").join("red").join("skin.materials.json");
        assert_eq!(
            relative_path(file.as_path(), base.as_path()).as_deref(),
            Some("vehicles/pickup/red/skin.materials.json")
        );
    }

    #[test]
    fn test_relative_path_outside_base() {
        assert_eq!(relative_path(Path::new("a/b"), Path::new("c")), None);
    }

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize_path(r"vehicles\pickup\red"), "vehicles/pickup/red");
    }
}
