/// File name checks shared by the loader and the writer
use crate::error::NameError;

/// Characters never allowed in an output file name
pub const FORBIDDEN_CHARS: &str = "/\\:*?\"<>|";

/// Text after the last '.'
pub fn file_extension(name: &str) -> Result<&str, NameError> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .ok_or_else(|| NameError::MissingExtension(name.to_string()))
}

/// Accept a bare file name: at most one '.', none of [`FORBIDDEN_CHARS`].
///
/// Path separators are forbidden, so a checked name always refers to the
/// directory it is resolved against.
pub fn check_file_name(name: &str) -> Result<(), NameError> {
    let mut dot_seen = false;
    for ch in name.chars() {
        if ch == '.' {
            if dot_seen {
                return Err(NameError::TooManyDots(name.to_string()));
            }
            dot_seen = true;
        }
        if FORBIDDEN_CHARS.contains(ch) {
            return Err(NameError::ForbiddenChar {
                name: name.to_string(),
                ch,
            });
        }
    }
    Ok(())
}
