use super::matcher::ArtifactPathMatcher;
use super::report::{DryRunReport, dependency_name};
use super::is_protected;
use crate::error::{Result, SlimError};
use crate::util::format_bytes;
use jarslim_api::{ArtifactIdentity, DependencySet};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use zip::{ZipArchive, ZipWriter};

/// What happens to one archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDecision<'a> {
    /// Under a protected prefix; always copied.
    Protected,
    Keep,
    Drop(&'a ArtifactIdentity),
}

/// Counters accumulated over one pass. Sizes are uncompressed entry sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub total_entries: usize,
    pub excluded_entries: usize,
    pub failed_entries: usize,
    pub total_bytes: u64,
    pub excluded_bytes: u64,
}

/// Sibling path the rewritten archive is written to before the swap: `temp-<name>`.
pub fn temp_path_for(archive: &Path) -> PathBuf {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive.jar".to_string());
    archive.with_file_name(format!("temp-{}", name))
}

/// Drops every entry that belongs to an excluded artifact.
///
/// Each variant walks the source archive once, in central directory order.
pub struct ArchiveRewriter<'a> {
    matcher: ArtifactPathMatcher<'a>,
    verbose: bool,
}

impl<'a> ArchiveRewriter<'a> {
    pub fn new(excluded: &'a DependencySet) -> Self {
        Self {
            matcher: ArtifactPathMatcher::new(excluded),
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn decide(&self, entry_path: &str) -> EntryDecision<'a> {
        if is_protected(entry_path) {
            return EntryDecision::Protected;
        }
        match self.matcher.find(entry_path) {
            Some(artifact) => EntryDecision::Drop(artifact),
            None => EntryDecision::Keep,
        }
    }

    /// Rewrites `archive` in place.
    ///
    /// The filtered archive is written next to the original first. Only once that pass has
    /// completed is the original deleted and the new file renamed over it. Any failure during
    /// the pass leaves the original as it was.
    pub fn apply(&self, archive: &Path) -> Result<RewriteStats> {
        ensure_archive(archive)?;
        let temp = temp_path_for(archive);

        let stats = match self.rewrite_to(archive, &temp) {
            Ok(stats) => stats,
            Err(e) => {
                if temp.is_file() {
                    let _ = fs::remove_file(&temp);
                }
                return Err(e);
            }
        };

        replace_original(archive, &temp)?;

        info!(
            "Processed {} entries, excluded {} entries",
            stats.total_entries, stats.excluded_entries
        );
        info!("Excluded {} of content", format_bytes(stats.excluded_bytes));
        if stats.failed_entries > 0 {
            warn!(
                "{} entries could not be processed and were left out",
                stats.failed_entries
            );
        }

        Ok(stats)
    }

    /// One streaming pass from `source` into a new archive at `dest`. Kept entries are
    /// raw-copied, so their compressed bytes, names and metadata are untouched.
    pub fn rewrite_to(&self, source: &Path, dest: &Path) -> Result<RewriteStats> {
        let mut archive = open_archive(source)?;
        let mut writer = ZipWriter::new(BufWriter::new(File::create(dest)?));
        let mut stats = RewriteStats::default();

        for index in 0..archive.len() {
            stats.total_entries += 1;

            let entry = match archive.by_index_raw(index) {
                Ok(entry) => entry,
                Err(e) => {
                    error!("Error reading entry #{}: {}", index, e);
                    stats.failed_entries += 1;
                    continue;
                }
            };

            let name = entry.name().to_string();
            let size = entry.size();
            stats.total_bytes += size;

            if let EntryDecision::Drop(artifact) = self.decide(&name) {
                stats.excluded_entries += 1;
                stats.excluded_bytes += size;
                if self.verbose {
                    info!("Excluding: {} ({})", name, artifact.key());
                }
                continue;
            }

            if let Err(e) = writer.raw_copy_file(entry) {
                error!("Error processing entry: {}: {}", name, e);
                stats.failed_entries += 1;
            }
        }

        let mut out = writer.finish()?;
        out.flush()?;
        Ok(stats)
    }

    /// Dry run: same walk and decisions as [`apply`](Self::apply), nothing is written.
    pub fn report(&self, archive: &Path) -> Result<DryRunReport> {
        ensure_archive(archive)?;
        let mut zip = open_archive(archive)?;
        let mut report = DryRunReport::new(archive.to_path_buf());

        for index in 0..zip.len() {
            report.stats.total_entries += 1;

            let (name, size) = match zip.by_index_raw(index) {
                Ok(entry) => (entry.name().to_string(), entry.size()),
                Err(e) => {
                    error!("Error reading entry #{}: {}", index, e);
                    report.stats.failed_entries += 1;
                    continue;
                }
            };
            report.stats.total_bytes += size;

            let dependency = dependency_name(&name);
            if let EntryDecision::Drop(artifact) = self.decide(&name) {
                report.stats.excluded_entries += 1;
                report.stats.excluded_bytes += size;
                if self.verbose {
                    info!("Would exclude: {} ({})", name, artifact.key());
                }
                report.excluded.insert(dependency);
            } else {
                report.included.insert(dependency);
            }
        }

        report.log_summary(self.verbose);
        Ok(report)
    }
}

fn ensure_archive(archive: &Path) -> Result<()> {
    if !archive.is_file() {
        return Err(SlimError::MissingArtifact(archive.to_path_buf()));
    }
    Ok(())
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// An archive that is gone or cannot be read counts as missing.
fn open_error(path: &Path, err: io::Error) -> SlimError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            SlimError::MissingArtifact(path.to_path_buf())
        }
        _ => SlimError::Io(err),
    }
}

/// Delete-then-rename swap. A failed delete leaves the original in place; a failed rename
/// after a successful delete means the original is gone and only `temp` holds the content.
fn replace_original(original: &Path, temp: &Path) -> Result<()> {
    if let Err(source) = fs::remove_file(original) {
        let _ = fs::remove_file(temp);
        return Err(SlimError::DeleteOriginal {
            path: original.to_path_buf(),
            source,
        });
    }
    debug!("Deleted original archive {}", original.display());

    fs::rename(temp, original).map_err(|source| SlimError::RenameProcessed {
        temp: temp.to_path_buf(),
        path: original.to_path_buf(),
        source,
    })
}
