//! Stale output cleanup between incremental builds
//!
//! An [`OutputCleaner`] is driven by two calls per build round:
//!
//! 1. [`OutputCleaner::render_start`] before output is produced. On the first
//!    round it records every file already in the output directory; on later
//!    rounds it reuses the files written by the previous round.
//! 2. [`OutputCleaner::write_bundle`] after output is written, with the names
//!    of the files this round emitted. Recorded files that were not emitted
//!    again are stale and get deleted, unless they match an exclude pattern.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Result;

/// Recursively list the regular files under `dir`.
///
/// A directory that does not exist lists as empty; unreadable entries are
/// skipped.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Tracks output files across build rounds and deletes the stale ones.
#[derive(Debug, Default)]
pub struct OutputCleaner {
    exclude: Vec<Pattern>,
    at_start: BTreeSet<PathBuf>,
    at_end: BTreeSet<PathBuf>,
}

impl OutputCleaner {
    /// Create a cleaner that never deletes files matching `exclude`.
    ///
    /// Patterns are matched against both the path relative to the output
    /// directory and the full path.
    pub fn new<I, S>(exclude: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exclude = exclude
            .into_iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            exclude,
            ..Default::default()
        })
    }

    /// Files currently considered present at the start of the round.
    pub fn tracked(&self) -> &BTreeSet<PathBuf> {
        &self.at_start
    }

    /// Record the files present before this round's output is written.
    pub fn render_start(&mut self, dir: &Path) {
        if self.at_end.is_empty() {
            self.at_start.extend(list_files(dir));
            debug!(
                "Recorded {} existing files under {}",
                self.at_start.len(),
                dir.display()
            );
        } else {
            // Rebuild round: the previous round's output is what exists now.
            std::mem::swap(&mut self.at_start, &mut self.at_end);
            debug!(
                "Reusing {} files written by the previous round",
                self.at_start.len()
            );
        }
    }

    fn is_excluded(&self, dir: &Path, file: &Path) -> bool {
        let relative = file.strip_prefix(dir).unwrap_or(file);
        self.exclude
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(file))
    }

    /// Record this round's emitted files and delete the stale ones.
    ///
    /// `emitted` names are relative to `dir`. Returns the deleted paths. A file
    /// that is already gone is not an error; other deletion failures are
    /// logged and skipped.
    pub fn write_bundle<I, S>(&mut self, dir: &Path, emitted: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        self.at_end.clear();
        for name in emitted {
            let file = dir.join(name.as_ref());
            self.at_start.remove(&file);
            self.at_end.insert(file);
        }

        let mut deleted = Vec::new();
        for file in &self.at_start {
            if self.is_excluded(dir, file) {
                debug!("Keeping excluded file {}", file.display());
                continue;
            }

            match std::fs::remove_file(file) {
                Ok(()) => {
                    info!("Deleted stale output {}", file.display());
                    deleted.push(file.clone());
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Stale output {} is already gone", file.display());
                }
                Err(err) => warn!("Failed to delete {}: {}", file.display(), err),
            }
        }
        deleted
    }
}
