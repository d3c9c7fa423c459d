//! Source tree walker: converts markup documents, copies everything else

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use super::options::{ErrorPolicy, SiteOptions};
use super::report::{EntryAction, SiteReport};
use crate::converter::{DocumentConverter, DocumentStatistics};
use crate::page;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("input path {path:?} is not a directory")]
    NotADirectory { path: PathBuf },
    #[error("output directory {path:?} is the input directory")]
    SameDirectory { path: PathBuf },
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to read directory {path:?}: {source}")]
    ReadDir {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to read {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        #[source]
        source: std::io::Error,
        from: PathBuf,
        to: PathBuf,
    },
}

/// State of one generation run
struct Walk<'a> {
    input_root: &'a Path,
    output_root: &'a Path,
    /// Canonical output root, skipped if met inside the input tree
    output_canonical: PathBuf,
    report: SiteReport,
}

pub struct SiteGenerator {
    options: SiteOptions,
    converter: DocumentConverter,
}

impl SiteGenerator {
    pub fn new(options: SiteOptions) -> Self {
        let converter = DocumentConverter::new(options.convert.clone());
        Self { options, converter }
    }

    /// Whether `path` is routed to the converter
    pub fn is_markup(&self, path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(self.options.markup_extension())
    }

    /// Output path of a markup document, relative to the output root
    pub fn converted_path(&self, relative: &Path) -> PathBuf {
        relative.with_extension(self.options.output_extension())
    }

    /// Mirror `input_dir` into `output_dir`.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failure is returned and the
    /// output tree may be partially populated. Under
    /// [`ErrorPolicy::Continue`] failures are collected in the report.
    pub fn generate(&self, input_dir: &Path, output_dir: &Path) -> Result<SiteReport, SiteError> {
        let start_time = Instant::now();

        if !input_dir.is_dir() {
            return Err(SiteError::NotADirectory {
                path: input_dir.to_path_buf(),
            });
        }
        fs::create_dir_all(output_dir).map_err(|source| SiteError::CreateDir {
            source,
            path: output_dir.to_path_buf(),
        })?;

        let output_canonical = canonical(output_dir)?;
        if canonical(input_dir)? == output_canonical {
            return Err(SiteError::SameDirectory {
                path: output_dir.to_path_buf(),
            });
        }

        let mut walk = Walk {
            input_root: input_dir,
            output_root: output_dir,
            output_canonical,
            report: SiteReport::new(
                &input_dir.display().to_string(),
                &output_dir.display().to_string(),
            ),
        };
        self.walk_dir(&mut walk, input_dir)?;

        let mut report = walk.report;
        report.duration_ms = start_time.elapsed().as_millis() as u64;
        log::info!(
            "generated site in {}: {} converted, {} copied, {} directories, {} failed ({}ms)",
            output_dir.display(),
            report.documents_converted,
            report.files_copied,
            report.directories_created,
            report.failures.len(),
            report.duration_ms
        );
        Ok(report)
    }

    /// Apply the error policy to the outcome of one entry.
    fn settle(
        &self,
        walk: &mut Walk<'_>,
        path: &Path,
        result: Result<(), SiteError>,
    ) -> Result<(), SiteError> {
        match result {
            Ok(()) => Ok(()),
            Err(err) => match self.options.on_error {
                ErrorPolicy::Abort => {
                    log::error!("{}; aborting", err);
                    Err(err)
                }
                ErrorPolicy::Continue => {
                    log::warn!("{}; continuing", err);
                    walk.report
                        .add_failure(&path.display().to_string(), err.to_string());
                    Ok(())
                }
            },
        }
    }

    fn walk_dir(&self, walk: &mut Walk<'_>, dir: &Path) -> Result<(), SiteError> {
        let entries = match read_sorted(dir) {
            Ok(entries) => entries,
            Err(err) => return self.settle(walk, dir, Err(err)),
        };

        for path in entries {
            // always under input_root
            let relative = path.strip_prefix(walk.input_root).unwrap_or(&path).to_path_buf();

            if path.is_dir() {
                if canonical(&path).ok().as_ref() == Some(&walk.output_canonical) {
                    log::info!("skipping output directory {} inside input", path.display());
                    continue;
                }
                let target = walk.output_root.join(&relative);
                let created = fs::create_dir_all(&target).map_err(|source| SiteError::CreateDir {
                    source,
                    path: target.clone(),
                });
                match created {
                    Ok(()) => {
                        walk.report.record(
                            &path.display().to_string(),
                            &target.display().to_string(),
                            EntryAction::CreatedDirectory,
                        );
                        if path.is_symlink() {
                            log::debug!("not descending into symlinked directory {}", path.display());
                        } else {
                            self.walk_dir(walk, &path)?;
                        }
                    }
                    Err(err) => self.settle(walk, &path, Err(err))?,
                }
            } else if self.is_markup(&path) {
                let target = walk.output_root.join(self.converted_path(&relative));
                log::debug!("converting {} -> {}", path.display(), target.display());
                let result = self.convert_document(&path, &target).map(|stats| {
                    walk.report.documents.merge(&stats);
                    walk.report.record(
                        &path.display().to_string(),
                        &target.display().to_string(),
                        EntryAction::Converted,
                    );
                });
                self.settle(walk, &path, result)?;
            } else {
                let target = walk.output_root.join(&relative);
                log::debug!("copying {} -> {}", path.display(), target.display());
                let result = copy_file(&path, &target).map(|_| {
                    walk.report.record(
                        &path.display().to_string(),
                        &target.display().to_string(),
                        EntryAction::Copied,
                    );
                });
                self.settle(walk, &path, result)?;
            }
        }
        Ok(())
    }

    /// Convert one document file, overwriting `output`.
    pub fn convert_document(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<DocumentStatistics, SiteError> {
        let bytes = fs::read(input).map_err(|source| SiteError::Read {
            source,
            path: input.to_path_buf(),
        })?;

        let write_err = |source: std::io::Error| SiteError::Write {
            source,
            path: output.to_path_buf(),
        };
        let mut writer = BufWriter::new(fs::File::create(output).map_err(write_err)?);

        let page_options = &self.options.page;
        if page_options.standalone {
            let text = String::from_utf8_lossy(&bytes);
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default();
            let title = page::document_title(&text, self.options.convert.fence).unwrap_or(stem.as_ref());
            page_options.write_header(title, &mut writer).map_err(write_err)?;
        }
        let stats = self
            .converter
            .convert_reader(&mut bytes.as_slice(), &mut writer)
            .map_err(write_err)?;
        page_options.write_footer(&mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        if stats.unterminated_fence {
            log::warn!("{}: unterminated preformatted block", input.display());
        }
        Ok(stats)
    }
}

impl Default for SiteGenerator {
    fn default() -> Self {
        Self::new(SiteOptions::default())
    }
}

fn canonical(path: &Path) -> Result<PathBuf, SiteError> {
    path.canonicalize().map_err(|source| SiteError::ReadDir {
        source,
        path: path.to_path_buf(),
    })
}

/// Directory entries in name order
fn read_sorted(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let read_err = |source: std::io::Error| SiteError::ReadDir {
        source,
        path: dir.to_path_buf(),
    };
    let mut paths = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    paths.sort();
    Ok(paths)
}

/// Byte-for-byte copy, replacing any existing file
fn copy_file(from: &Path, to: &Path) -> Result<u64, SiteError> {
    fs::copy(from, to).map_err(|source| SiteError::Copy {
        source,
        from: from.to_path_buf(),
        to: to.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markup() {
        let generator = SiteGenerator::default();
        assert!(generator.is_markup(Path::new("notes/index.gmi")));
        assert!(!generator.is_markup(Path::new("notes/index.gmi.bak")));
        assert!(!generator.is_markup(Path::new("notes/image.png")));
        assert!(!generator.is_markup(Path::new("notes/.gmi")));
        assert!(!generator.is_markup(Path::new("notes/INDEX.GMI")));
    }

    #[test]
    fn test_converted_path() {
        let generator = SiteGenerator::default();
        assert_eq!(
            generator.converted_path(Path::new("a/b/post.v2.gmi")),
            PathBuf::from("a/b/post.v2.html")
        );
    }

    #[test]
    fn test_custom_extensions() {
        let generator = SiteGenerator::new(SiteOptions {
            markup_extension: ".gemini".to_string(),
            output_extension: "htm".to_string(),
            ..Default::default()
        });
        assert!(generator.is_markup(Path::new("x.gemini")));
        assert!(!generator.is_markup(Path::new("x.gmi")));
        assert_eq!(generator.converted_path(Path::new("x.gemini")), PathBuf::from("x.htm"));
    }

    #[test]
    fn test_generate_rejects_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let err = SiteGenerator::default()
            .generate(&tmp.path().join("missing"), &tmp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, SiteError::NotADirectory { .. }));
    }

    #[test]
    fn test_generate_rejects_same_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = SiteGenerator::default()
            .generate(tmp.path(), tmp.path())
            .unwrap_err();
        assert!(matches!(err, SiteError::SameDirectory { .. }));
    }
}
