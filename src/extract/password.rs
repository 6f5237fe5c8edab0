//! Passwords embedded in document file names.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

fn password_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Last `#...#` pair: no `#` may follow the closing delimiter.
    PATTERN.get_or_init(|| Regex::new(r"#([^#]+)#[^#]*$").expect("password pattern is valid"))
}

/// Parse the password between the last pair of `#` in a file name.
///
/// Only the final path component is searched.
///
/// ```
/// use pdf_contents::extract::password_from_filename;
///
/// let password = password_from_filename("statements/march#mySecret123#.pdf").unwrap();
/// assert_eq!(password, "mySecret123");
/// ```
pub fn password_from_filename<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());

    password_pattern()
        .captures(&name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(Error::MissingPassword)
}
