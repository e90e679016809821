//! Frame validity scanning.
//!
//! A valid frame is a non-hidden file with an allowed extension that the
//! store can open and verify. Extension filtering always runs before
//! verification, which opens the file and is far more expensive.

use std::ffi::OsStr;
use std::path::Path;

use tracing::debug;

use crate::ports::FrameStore;

/// Extensions accepted when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Collects indexes of valid frames in `files`.
///
/// A positive `max_frames` scans forward from `start_from` (inclusive). A
/// negative one scans backward, collecting at most `|max_frames|`, starting
/// just before `start_from`, or at the last file when `start_from <= 0`.
/// Zero collects nothing.
///
/// `files` must be the sorted listing of `directory`. Returned indexes are in
/// scan order.
pub fn find_valid_frames<S, E>(
    store: &S,
    files: &[String],
    directory: &Path,
    max_frames: isize,
    start_from: isize,
    extensions: &[E],
) -> Vec<usize>
where
    S: FrameStore + ?Sized,
    E: AsRef<str>,
{
    let limit = max_frames.unsigned_abs();
    if max_frames > 0 {
        let start = usize::try_from(start_from).unwrap_or(0);
        scan_forward(store, files, directory, limit, start, extensions)
    } else if max_frames < 0 {
        let end = usize::try_from(start_from)
            .ok()
            .filter(|&s| s > 0)
            .map_or(files.len(), |s| s.min(files.len()));
        scan_backward(store, files, directory, limit, end, extensions)
    } else {
        Vec::new()
    }
}

/// Collects up to `limit` valid frames at or after `start`, ascending.
pub fn scan_forward<S, E>(
    store: &S,
    files: &[String],
    directory: &Path,
    limit: usize,
    start: usize,
    extensions: &[E],
) -> Vec<usize>
where
    S: FrameStore + ?Sized,
    E: AsRef<str>,
{
    collect_valid(store, files, directory, limit, start..files.len(), extensions)
}

/// Collects up to `limit` valid frames strictly before `end`, descending.
pub fn scan_backward<S, E>(
    store: &S,
    files: &[String],
    directory: &Path,
    limit: usize,
    end: usize,
    extensions: &[E],
) -> Vec<usize>
where
    S: FrameStore + ?Sized,
    E: AsRef<str>,
{
    let end = end.min(files.len());
    collect_valid(store, files, directory, limit, (0..end).rev(), extensions)
}

fn collect_valid<S, E>(
    store: &S,
    files: &[String],
    directory: &Path,
    limit: usize,
    indexes: impl Iterator<Item = usize>,
    extensions: &[E],
) -> Vec<usize>
where
    S: FrameStore + ?Sized,
    E: AsRef<str>,
{
    let mut valid = Vec::new();
    if limit == 0 {
        return valid;
    }

    for index in indexes {
        let name = &files[index];
        if !is_candidate(name, extensions) {
            continue;
        }

        let path = directory.join(name);
        match store.verify(&path) {
            Ok(()) => {
                valid.push(index);
                if valid.len() == limit {
                    break;
                }
            }
            Err(e) => debug!("Skipping {}: {e:#}", path.display()),
        }
    }

    valid
}

/// Checks the cheap, name-only part of frame validity.
pub fn is_candidate<E: AsRef<str>>(name: &str, extensions: &[E]) -> bool {
    !name.starts_with('.') && has_allowed_extension(name, extensions)
}

/// Case-insensitive suffix match; a leading dot in `extensions` is ignored.
fn has_allowed_extension<E: AsRef<str>>(name: &str, extensions: &[E]) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}
