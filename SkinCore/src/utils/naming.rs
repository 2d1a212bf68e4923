//! Identifier derivation for skins and mods

/// Derive the skin identifier from a display name
///
/// Lowercases and turns spaces into underscores. The result names the skin
/// folder, the texture reference and the jbeam slot.
#[must_use]
pub fn sanitize_skin_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Derive the archive file stem from a mod name
#[must_use]
pub fn sanitize_mod_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_id() {
        assert_eq!(sanitize_skin_id("Red Racer"), "red_racer");
        assert_eq!(sanitize_skin_id("already_ok"), "already_ok");
    }

    #[test]
    fn test_mod_name_keeps_case() {
        assert_eq!(sanitize_mod_name("  My Skin Pack "), "My_Skin_Pack");
    }
}
