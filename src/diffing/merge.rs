use crate::diffing::patching::{PatchOptions, apply_diff_patch_with};
use crate::models::{FileSet, MergeOutcome, ParsedResponse};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MergeOptions {
    pub patch: PatchOptions,
    /// Adopt a patched file even when some of its instructions failed.
    pub keep_partial: bool,
}

/// Folds a parsed reply into the project's files.
///
/// Full-file blocks land first, then edit blocks apply in reply order, each
/// against the file as it stands after everything merged before it. A file
/// only takes its patched content when every instruction applied, unless
/// `keep_partial` is set.
pub fn merge_response(files: FileSet, parsed: &ParsedResponse, options: &MergeOptions) -> MergeOutcome {
    let mut merged = files;
    let mut changed: Vec<String> = Vec::new();
    let mut results = Vec::new();
    let mut missing_files = Vec::new();

    for (name, content) in parsed.full_files.iter() {
        if merged.get(name) != Some(content) {
            merged.insert(name, content);
            mark_changed(&mut changed, name);
        }
    }

    for block in &parsed.edits {
        let Some(current) = merged.get(&block.filename) else {
            tracing::warn!(file = %block.filename, "edit targets a file that is not in the project");
            missing_files.push(block.filename.clone());
            continue;
        };

        let result = apply_diff_patch_with(current, &block.instructions, &options.patch);
        let adopt = result.succeeded || (options.keep_partial && result.applied_count > 0);
        if adopt && result.content != current {
            merged.insert(block.filename.as_str(), result.content.as_str());
            mark_changed(&mut changed, &block.filename);
        }
        results.push((block.filename.clone(), result));
    }

    MergeOutcome {
        files: merged,
        results,
        missing_files,
        changed,
    }
}

fn mark_changed(changed: &mut Vec<String>, name: &str) {
    if !changed.iter().any(|c| c == name) {
        changed.push(name.to_string());
    }
}
