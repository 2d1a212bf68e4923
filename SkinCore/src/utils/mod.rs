//! Utility functions

pub mod naming;
pub mod path;

pub use naming::{sanitize_mod_name, sanitize_skin_id};
pub use path::{file_name_string, normalize_path, relative_path};
