//! File copying with explicit progress callbacks.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

const CHUNK: usize = 16 * 1024;

/// Copy `src` into `dest_dir` under the same file name.
///
/// `on_progress` receives `(copied, total)` after every chunk. An interrupted
/// copy leaves a partial file behind.
pub fn copy_file(
    src: &Path,
    dest_dir: &Path,
    on_progress: &mut dyn FnMut(u64, u64),
) -> io::Result<u64> {
    let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"))?;
    copy_file_to(src, &dest_dir.join(name), on_progress)
}

fn copy_file_to(
    src: &Path,
    dest: &Path,
    on_progress: &mut dyn FnMut(u64, u64),
) -> io::Result<u64> {
    let mut reader = File::open(src)?;
    let meta = reader.metadata()?;
    let total = meta.len();
    let mut writer = File::create(dest)?;

    let mut buf = vec![0u8; CHUNK];
    let mut copied = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        copied += n as u64;
        on_progress(copied, total);
    }
    writer.flush()?;
    // Permissions are best-effort, the data is what matters.
    let _ = fs::set_permissions(dest, meta.permissions());
    if total == 0 {
        on_progress(0, 0);
    }
    Ok(copied)
}

/// Recursively copy the directory `src` to `dest`, file by file.
///
/// `on_progress` receives the file being copied with its `(copied, total)`.
/// Returns the number of bytes copied.
pub fn copy_tree(
    src: &Path,
    dest: &Path,
    on_progress: &mut dyn FnMut(&Path, u64, u64),
) -> io::Result<u64> {
    let mut bytes = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target: PathBuf = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            let file = entry.path();
            bytes += copy_file_to(file, &target, &mut |copied, total| {
                on_progress(file, copied, total)
            })?;
        }
    }
    Ok(bytes)
}
