//! Few-shot example loading
//!
//! Each example is a triple of files sharing a stem: the original article
//! (`.txt`), the hand-formatted markdown (`.md`) and its metadata (`.json`).

use std::path::{Path, PathBuf};

use crate::{MaqalError, Result};

/// Example stems shipped with every prompt.
pub const FEW_SHOT_EXAMPLES: [&str; 2] = ["nomacs-image-viewer", "fontPreviewer"];

/// A worked input/output pair shown to the model before the real article
#[derive(Debug, Clone, PartialEq)]
pub struct FewShotExample {
    pub name: String,
    pub input: String,
    pub markdown_output: String,
    pub json_output: String,
}

/// Paths of the three files backing one example.
pub fn example_paths(dir: &Path, name: &str) -> [PathBuf; 3] {
    [
        dir.join(format!("{name}.txt")),
        dir.join(format!("{name}.md")),
        dir.join(format!("{name}.json")),
    ]
}

/// Files of the named example that do not exist.
pub fn missing_files(dir: &Path, name: &str) -> Vec<PathBuf> {
    example_paths(dir, name)
        .into_iter()
        .filter(|p| !p.exists())
        .collect()
}

/// Load a single example, failing if any of its files is missing.
pub fn load_example(dir: &Path, name: &str) -> Result<FewShotExample> {
    let missing = missing_files(dir, name);
    if !missing.is_empty() {
        return Err(MaqalError::MissingExampleFiles {
            name: name.to_string(),
            missing,
        });
    }

    let [txt_path, md_path, json_path] = example_paths(dir, name);

    Ok(FewShotExample {
        name: name.to_string(),
        input: std::fs::read_to_string(txt_path)?,
        markdown_output: std::fs::read_to_string(md_path)?,
        json_output: std::fs::read_to_string(json_path)?,
    })
}

/// Load every bundled few-shot example from `dir`.
pub fn load_examples(dir: &Path) -> Result<Vec<FewShotExample>> {
    load_named_examples(dir, &FEW_SHOT_EXAMPLES)
}

pub fn load_named_examples(dir: &Path, names: &[&str]) -> Result<Vec<FewShotExample>> {
    let examples = names
        .iter()
        .map(|name| load_example(dir, name))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = examples.len(), dir = %dir.display(), "Loaded few-shot examples");
    Ok(examples)
}
