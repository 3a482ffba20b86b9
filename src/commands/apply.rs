use crate::config::EngineConfig;
use crate::diffing::diff_utils::merge_diff;
use crate::diffing::merge::{MergeOptions, merge_response};
use crate::diffing::parser::{find_unterminated_blocks, parse_ai_response};
use crate::exceptions::CodepatchError;
use crate::fs::{atomic_write_text, load_files, read_input, validate_relative_path};
use crate::models::{MergeOutcome, ResponseKind};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct FileReport<'a> {
    file: &'a str,
    applied: usize,
    failed: usize,
    failed_snippets: &'a [String],
}

#[derive(Debug, Serialize)]
struct ApplySummary<'a> {
    kind: ResponseKind,
    changed: &'a [String],
    missing_files: &'a [String],
    results: Vec<FileReport<'a>>,
    commentary: &'a str,
}

pub struct ApplyArgs {
    pub reply: PathBuf,
    pub file_paths: Vec<PathBuf>,
    pub write: bool,
    pub keep_partial: bool,
    pub json: bool,
}

pub fn run(config: &EngineConfig, args: ApplyArgs) -> Result<(), CodepatchError> {
    let before = load_files(&args.file_paths)?;
    let reply = read_input(Some(args.reply.as_path()))?;

    for block in find_unterminated_blocks(&reply) {
        tracing::warn!(block = %block, "unterminated block treated as commentary");
    }

    let parsed = parse_ai_response(&reply);
    let options = MergeOptions {
        patch: config.patch_options(),
        keep_partial: args.keep_partial,
    };
    let outcome = merge_response(before.clone(), &parsed, &options);

    if args.json {
        let summary = ApplySummary {
            kind: parsed.kind,
            changed: &outcome.changed,
            missing_files: &outcome.missing_files,
            results: outcome
                .results
                .iter()
                .map(|(file, r)| FileReport {
                    file,
                    applied: r.applied_count,
                    failed: r.failed_count,
                    failed_snippets: &r.failed_snippets,
                })
                .collect(),
            commentary: &parsed.commentary,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", merge_diff(&before, &outcome));
        report_failures(&outcome);
    }

    if args.write {
        for name in &outcome.changed {
            let Some(content) = outcome.files.get(name) else {
                continue;
            };
            let target = if before.contains(name) {
                Path::new(name).to_path_buf()
            } else {
                validate_relative_path(name)?
            };
            atomic_write_text(&target, content)?;
            tracing::info!(file = %name, "wrote merged content");
        }
    }

    if !outcome.is_clean() {
        let failed: usize = outcome.results.iter().map(|(_, r)| r.failed_count).sum();
        return Err(CodepatchError::InvalidInput(format!(
            "{} search block(s) failed to apply, {} file(s) missing",
            failed,
            outcome.missing_files.len()
        )));
    }

    Ok(())
}

fn report_failures(outcome: &MergeOutcome) {
    for name in &outcome.missing_files {
        eprintln!("Warning: '{}' is not in the project. Edit skipped.", name);
    }
    for (name, result) in &outcome.results {
        for snippet in &result.failed_snippets {
            eprintln!(
                "Warning: search block not found in '{}': {}",
                name, snippet
            );
        }
    }
}
