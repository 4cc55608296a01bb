//! Collision-free upload names.
//!
//! An upload named `lecture.mp3` is stored as `lecture-<uuid v4>.mp3`. The 122 random bits of
//! the UUID make a collision negligible, so no existence check is made before writing; the
//! local backend still opens files with create-new semantics and fails rather than overwrite.

use uuid::Uuid;

/// Final path component of a client-supplied filename, accepting both `/` and `\`.
pub fn final_component(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
}

/// Split a file name into `(base, extension)`, the extension keeping its leading dot.
///
/// The extension starts at the last `.`; a leading dot (`.bashrc`) or the name `..` carry no
/// extension, and a trailing dot yields `"."`.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    if file_name == ".." {
        return (file_name, "");
    }
    match file_name.rfind('.') {
        None | Some(0) => (file_name, ""),
        Some(idx) => file_name.split_at(idx),
    }
}

/// Derive the destination name for an upload: `<base>-<uuid><ext>`.
///
/// Directory segments in `original` are dropped and control characters in the base are
/// replaced, so the result is always a bare file name.
pub fn generate_upload_name(original: &str) -> String {
    let (base, extension) = split_extension(final_component(original));
    let base: String = base
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect();

    format!("{}-{}{}", base, Uuid::new_v4(), extension)
}
