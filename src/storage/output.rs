//! Writing processed articles to disk

use std::path::{Path, PathBuf};

use crate::article::{ArticleResult, Metadata, KEY_IMAGE};
use crate::{MaqalError, Result};

/// Paths written by [`save_result`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
    pub markdown: PathBuf,
    pub metadata: PathBuf,
    pub image: Option<PathBuf>,
}

/// Persist `result` as `<base>.md` and `<base>.json` inside `output_dir`.
///
/// When `image` is given it is copied next to them as `<base>.<ext>` and the
/// metadata gains an `image` key naming the copy.
pub fn save_result(
    result: &ArticleResult,
    output_dir: &Path,
    base_filename: &str,
    image: Option<&Path>,
) -> Result<SavedFiles> {
    let base = base_filename.trim();
    if base.is_empty() {
        return Err(MaqalError::MissingFilename);
    }

    std::fs::create_dir_all(output_dir)?;

    let mut metadata = result.metadata.clone();

    let placed = match image {
        Some(source) => {
            let placed = place_image(source, output_dir, base)?;
            metadata.insert(KEY_IMAGE.to_string(), placed.name.clone());
            Some(placed)
        }
        None => None,
    };

    let written = write_article(output_dir, base, &result.markdown, &metadata);
    let (markdown_path, metadata_path) = match written {
        Ok(paths) => paths,
        Err(e) => {
            // Don't leave a copied image behind without metadata naming it.
            if let Some(placed) = placed.as_ref().filter(|p| p.copied) {
                let _ = std::fs::remove_file(&placed.path);
            }
            return Err(e);
        }
    };

    tracing::info!(
        markdown = %markdown_path.display(),
        metadata = %metadata_path.display(),
        "Saved article"
    );

    Ok(SavedFiles {
        markdown: markdown_path,
        metadata: metadata_path,
        image: placed.map(|p| p.path),
    })
}

struct PlacedImage {
    name: String,
    path: PathBuf,
    copied: bool,
}

/// Copy `source` to `<output_dir>/<base>.<ext>`.
///
/// When `source` already is that file the copy is skipped; copying a file
/// onto itself truncates it.
fn place_image(source: &Path, output_dir: &Path, base: &str) -> Result<PlacedImage> {
    let name = image_file_name(base, source);
    let target = output_dir.join(&name);

    let source_real = std::fs::canonicalize(source)?;
    let same_file = target.exists() && std::fs::canonicalize(&target)? == source_real;

    if same_file {
        tracing::debug!(image = %target.display(), "Image already in place");
    } else {
        std::fs::copy(source, &target)?;
        tracing::debug!(source = %source.display(), target = %target.display(), "Copied image");
    }

    Ok(PlacedImage {
        name,
        path: target,
        copied: !same_file,
    })
}

fn write_article(
    output_dir: &Path,
    base: &str,
    markdown: &str,
    metadata: &Metadata,
) -> Result<(PathBuf, PathBuf)> {
    let markdown_path = output_dir.join(format!("{base}.md"));
    std::fs::write(&markdown_path, markdown)?;

    let metadata_path = output_dir.join(format!("{base}.json"));
    std::fs::write(&metadata_path, render_metadata(metadata)?)?;

    Ok((markdown_path, metadata_path))
}

/// Pretty JSON with non-ASCII text left as-is.
pub fn render_metadata(metadata: &Metadata) -> Result<String> {
    Ok(serde_json::to_string_pretty(metadata)?)
}

fn image_file_name(base: &str, source: &Path) -> String {
    match source.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{base}.{ext}"),
        None => base.to_string(),
    }
}
