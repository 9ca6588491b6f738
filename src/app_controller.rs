use anyhow::{Result, anyhow};
use log::{debug, error, info};
use std::path::Path;

use crate::app_config::Config;
use crate::encoding::{SourceFile, TextEncoding};
use crate::errors::DecodeError;
use crate::rewriter::{LineRewriter, SkipRules};
use crate::scanner::{FileKind, Scanner};
use crate::translation_service::{Translate, TranslationService};

// @module: Application controller for the tree rewrite pass

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidate files found by the scanner
    pub scanned: usize,
    /// Files rewritten in place
    pub translated: usize,
    /// Files with no translatable Cyrillic content
    pub unchanged: usize,
    /// Files skipped because no candidate encoding decoded them
    pub skipped: usize,
    /// Files whose write-back failed
    pub failed: usize,
}

/// Main application controller for the translation pass
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation service built from the config
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config)?;
        Ok(Self { config, service })
    }

    /// Run the rewrite pass over the tree rooted at `root`
    pub async fn run<P: AsRef<Path>>(&self, root: P) -> Result<RunSummary> {
        run_with_translator(&self.config, &self.service, root.as_ref()).await
    }
}

/// Walk the tree and rewrite every candidate file, one file at a time.
///
/// Separated from `Controller` so tests can substitute the translation
/// collaborator.
pub async fn run_with_translator(
    config: &Config,
    translator: &dyn Translate,
    root: &Path,
) -> Result<RunSummary> {
    if !root.exists() {
        return Err(anyhow!("Input path does not exist: {:?}", root));
    }

    let scanner = Scanner::from_config(&config.scan);
    let candidates = scanner.scan(root)?;
    let encodings = config.scan.candidate_encodings()?;
    let rewriter = LineRewriter::new(translator, SkipRules::from_config(&config.skip));

    let mut summary = RunSummary {
        scanned: candidates.len(),
        ..RunSummary::default()
    };

    for (path, kind) in candidates {
        match kind {
            FileKind::Shell => info!("Processing SH: {:?}", path),
            FileKind::Markdown => info!("Processing MD: {:?}", path),
        }

        match process_file(&rewriter, &path, kind, &encodings).await {
            Ok(true) => summary.translated += 1,
            Ok(false) => {
                debug!("No Cyrillic content translated in {:?}", path);
                summary.unchanged += 1;
            }
            Err(FileOutcome::Undecodable(e)) => {
                error!("{}", e);
                summary.skipped += 1;
            }
            Err(FileOutcome::WriteFailed(e)) => {
                // Fatal for this file only; the pass continues
                error!("Failed to save {:?}: {}", path, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Finished: {} candidate file(s), {} translated, {} unchanged, {} skipped, {} failed",
        summary.scanned, summary.translated, summary.unchanged, summary.skipped, summary.failed
    );

    Ok(summary)
}

/// Per-file failure modes the run loop reports separately
enum FileOutcome {
    Undecodable(DecodeError),
    WriteFailed(anyhow::Error),
}

/// Load, rewrite, and conditionally save one candidate file.
///
/// Returns whether the file was rewritten.
async fn process_file(
    rewriter: &LineRewriter<'_>,
    path: &Path,
    kind: FileKind,
    encodings: &[TextEncoding],
) -> Result<bool, FileOutcome> {
    let mut file = SourceFile::load(path, encodings).map_err(FileOutcome::Undecodable)?;

    let (lines, modified) = rewriter.rewrite(kind, &file.lines).await;
    if !modified {
        return Ok(false);
    }

    file.lines = lines;
    file.save().map_err(FileOutcome::WriteFailed)?;
    info!("Saved changes to {:?}", path);
    Ok(true)
}
