//! Reading and writing script files.
//!
//! Script files hold the canonical script text. A loaded script remembers the
//! path it came from as its source identity.

use std::fs;
use std::path::Path;

use log::info;

use crate::codec;
use crate::document::Document;
use crate::error::{Error, Result};

fn read_file(file_description: &str, path: &str) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// The name given to a script file that does not name itself: its file stem.
fn fallback_name(path: &str, default: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Loads a script from `path`.
///
/// # Arguments
///
/// * `path` - Path to the script file
/// * `default_name` - Name to use when neither the text nor the path supply one
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The text is not a well-formed script
pub fn load_script(path: &str, default_name: &str) -> Result<Document> {
    let text = read_file("script", path)?;
    let document = codec::parse(&text, &fallback_name(path, default_name))?;

    info!(
        "Loaded `{}` ({} commands) from `{path}`",
        document.display_name(),
        document.len()
    );

    Ok(document.with_source(path))
}

/// Writes `document` to `path` in canonical form, naming an unnamed document
/// `default_name`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn save_script(path: &str, document: &Document, default_name: &str) -> Result<()> {
    fs::write(path, codec::serialize_named(document, default_name))
        .map_err(|e| Error::io_error("script".to_string(), path.to_string(), e))?;

    info!("Saved `{}` to `{path}`", document.display_name_or(default_name));
    Ok(())
}
