use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Autonomy {
    Low,
    #[default]
    Medium,
    High,
    Max,
}

impl Autonomy {
    /// Unrecognized names fall back to `Medium`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "low" => Autonomy::Low,
            "high" => Autonomy::High,
            "max" => Autonomy::Max,
            _ => Autonomy::Medium,
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Autonomy::Low => AUTONOMY_LOW_HINT,
            Autonomy::Medium => AUTONOMY_MEDIUM_HINT,
            Autonomy::High => AUTONOMY_HIGH_HINT,
            Autonomy::Max => AUTONOMY_MAX_HINT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Fast,
    Full,
}

impl BuildMode {
    /// Only `full` selects a full build.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("full") {
            BuildMode::Full
        } else {
            BuildMode::Fast
        }
    }

    fn hint(self) -> &'static str {
        match self {
            BuildMode::Fast => BUILD_FAST_HINT,
            BuildMode::Full => BUILD_FULL_HINT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    pub autonomy: Autonomy,
    pub build_mode: BuildMode,
    pub custom_system_prompt: String,
    pub has_existing_files: bool,
}

/// Assembles the system prompt that teaches the model the reply grammar.
///
/// The edit-mode section is only included when the project already has
/// files to edit.
pub fn build_system_prompt(options: &PromptOptions) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if !options.custom_system_prompt.is_empty() {
        parts.push(&options.custom_system_prompt);
    }
    parts.push(BASE_SYSTEM_PROMPT);
    if options.has_existing_files {
        parts.push(EDIT_MODE_INSTRUCTIONS);
    }
    parts.push(options.autonomy.hint());
    parts.push(options.build_mode.hint());

    parts.join("\n\n")
}
