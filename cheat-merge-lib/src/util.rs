use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sibling temp path used while rewriting `path`: `<name>.tmp` in the same directory.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with whatever `write` produces, all or nothing.
///
/// The content goes to a temp file in the same directory which is then
/// renamed over the target. On any error the temp file is removed and the
/// target keeps its previous bytes. The parent directory is created if needed.
pub fn write_atomically<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    let result = (|| {
        let mut out = BufWriter::new(fs::File::create(&tmp_path)?);
        write(&mut out)?;
        out.flush()?;
        out.into_inner()
            .map_err(|e| e.into_error())?
            .sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Convenience wrapper for writing a byte buffer atomically.
pub fn write_bytes_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    write_atomically(path, |out| out.write_all(bytes))
}

#[cfg(test)]
#[path = "tests/util_tests.rs"]
mod tests;
