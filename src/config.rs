use crate::consts::*;
use crate::context::budget::create_budget;
use crate::diffing::patching::{DEFAULT_FUZZY_THRESHOLD, PatchOptions};
use crate::exceptions::CodepatchError;
use crate::models::ContextBudget;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Context window of the target model.
    pub max_tokens: u32,
    pub reserved_output_tokens: u32,
    /// Budget for the rendered project file snapshot.
    pub file_context_tokens: u32,
    pub fuzzy_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tokens: 128_000,
            reserved_output_tokens: 8_192,
            file_context_tokens: 16_000,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Reads the optional JSON file, then lets `CODEPATCH_*` variables override it.
    pub fn load(path: Option<&Path>) -> Result<Self, CodepatchError> {
        let mut config = match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)?;
                serde_json::from_str(&text)?
            }
            None => EngineConfig::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), CodepatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_env(&lookup, ENV_MAX_TOKENS)? {
            self.max_tokens = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_RESERVED_OUTPUT_TOKENS)? {
            self.reserved_output_tokens = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_FILE_CONTEXT_TOKENS)? {
            self.file_context_tokens = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_FUZZY_THRESHOLD)? {
            self.fuzzy_threshold = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CodepatchError> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(CodepatchError::Configuration(format!(
                "fuzzy_threshold must be between 0 and 1, got {}",
                self.fuzzy_threshold
            )));
        }
        Ok(())
    }

    pub fn budget(&self, system_prompt_tokens: u32) -> ContextBudget {
        create_budget(
            self.max_tokens,
            system_prompt_tokens,
            self.reserved_output_tokens,
        )
    }

    pub fn patch_options(&self) -> PatchOptions {
        PatchOptions {
            fuzzy_threshold: self.fuzzy_threshold,
        }
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>, CodepatchError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            CodepatchError::Configuration(format!("{} has an invalid value: '{}'", key, raw))
        }),
    }
}
