use crate::exceptions::CodepatchError;
use crate::models::FileSet;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Atomically write text to a file using a temporary file + rename strategy.
pub fn atomic_write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), CodepatchError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Same directory as the target so the rename never crosses filesystems
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(text.as_bytes())?;
    temp_file
        .persist(path)
        .map_err(|e| CodepatchError::Io(e.error))?;

    Ok(())
}

/// Reads the given files into a [`FileSet`], keyed by the path as written
/// and kept in argument order.
pub fn load_files(paths: &[PathBuf]) -> Result<FileSet, CodepatchError> {
    let mut files = FileSet::new();
    for path in paths {
        if path.is_dir() {
            return Err(CodepatchError::InvalidInput(format!(
                "Cannot load a directory: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        files.insert(path_key(path), content);
    }
    Ok(files)
}

/// Reads a file, or stdin when no path (or `-`) is given.
pub fn read_input(path: Option<&Path>) -> Result<String, CodepatchError> {
    match path {
        Some(p) if p != Path::new("-") => Ok(fs::read_to_string(p)?),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Rejects model-supplied paths that would escape the working directory.
pub fn validate_relative_path(name: &str) -> Result<PathBuf, CodepatchError> {
    let path = PathBuf::from(name);
    let escapes = path.is_absolute()
        || path.components().any(|c| {
            matches!(
                c,
                std::path::Component::ParentDir
                    | std::path::Component::RootDir
                    | std::path::Component::Prefix(_)
            )
        });
    if name.trim().is_empty() || escapes {
        return Err(CodepatchError::InvalidInput(format!(
            "Refusing to write outside the working directory: {}",
            name
        )));
    }
    Ok(path)
}
