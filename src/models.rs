use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// --- Enums ---

/// Message author. Only `System` is treated specially; any role string
/// outside the known three (`tool`, `function`, ...) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
            Role::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseKind {
    FullFile,
    Diff,
    Mixed,
    TextOnly,
}

impl ResponseKind {
    pub fn classify(has_full_files: bool, has_edits: bool) -> Self {
        match (has_full_files, has_edits) {
            (true, true) => ResponseKind::Mixed,
            (false, true) => ResponseKind::Diff,
            (true, false) => ResponseKind::FullFile,
            (false, false) => ResponseKind::TextOnly,
        }
    }
}

impl std::fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseKind::FullFile => write!(f, "full-file"),
            ResponseKind::Diff => write!(f, "diff"),
            ResponseKind::Mixed => write!(f, "mixed"),
            ResponseKind::TextOnly => write!(f, "text-only"),
        }
    }
}

// --- Conversation ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudget {
    pub max_tokens: u32,
    pub system_prompt_tokens: u32,
    pub reserved_output_tokens: u32,
    pub available_for_history: u32,
}

// --- Project files ---

/// Ordered collection of `(name, content)` pairs.
///
/// Iteration order is insertion order and shows up in rendered prompt
/// context, so this is not a hash map. In JSON it is a `name -> content`
/// object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    entries: Vec<(String, String)>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Replaces the content of an existing entry in place, or appends a new one.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = content,
            None => self.entries.push((name, content)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for FileSet {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut set = FileSet::new();
        for (name, content) in iter {
            set.insert(name, content);
        }
        set
    }
}

impl Serialize for FileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, content) in &self.entries {
            map.serialize_entry(name, content)?;
        }
        map.end()
    }
}

struct FileSetVisitor;

impl<'de> Visitor<'de> for FileSetVisitor {
    type Value = FileSet;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of file names to contents")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FileSet, A::Error> {
        let mut files = FileSet::new();
        while let Some((name, content)) = access.next_entry::<String, String>()? {
            files.insert(name, content);
        }
        Ok(files)
    }
}

impl<'de> Deserialize<'de> for FileSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FileSetVisitor)
    }
}

// --- Diffing Models ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReplace {
    pub search: String,
    pub replace: String,
}

impl SearchReplace {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBlock {
    pub filename: String,
    pub instructions: Vec<SearchReplace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub kind: ResponseKind,
    pub full_files: FileSet,
    pub edits: Vec<EditBlock>,
    pub commentary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub succeeded: bool,
    pub content: String,
    pub applied_count: usize,
    pub failed_count: usize,
    pub failed_snippets: Vec<String>,
}

impl ApplyResult {
    pub fn unchanged(content: &str) -> Self {
        Self {
            succeeded: true,
            content: content.to_string(),
            applied_count: 0,
            failed_count: 0,
            failed_snippets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeOutcome {
    pub files: FileSet,
    pub results: Vec<(String, ApplyResult)>,
    pub missing_files: Vec<String>,
    pub changed: Vec<String>,
}

impl MergeOutcome {
    pub fn is_clean(&self) -> bool {
        self.missing_files.is_empty() && self.results.iter().all(|(_, r)| r.succeeded)
    }
}

// --- Helpers ---

pub fn format_file_context_xml(path: &str, content: &str) -> String {
    let mut block = format!("<file path=\"{}\">\n", path);
    block.push_str(content);
    if !content.ends_with('\n') {
        block.push('\n');
    }
    block.push_str("</file>\n");
    block
}
