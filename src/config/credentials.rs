//! Interactive credential bootstrap

use anyhow::{Context, Result};
use std::io::{BufRead, IsTerminal, Write};
use std::sync::OnceLock;

use crate::config::Settings;

const KEY_PROMPT: &str = "Enter your Google AI API key: ";

/// Key entered at the prompt, kept for the rest of the process.
static PROMPTED_KEY: OnceLock<String> = OnceLock::new();

/// Make sure `settings.llm.api_key` is populated.
///
/// A key from config or environment wins. Otherwise the operator is asked
/// once per process when stdin is a terminal; later calls reuse that answer.
/// Non-interactive sessions leave the key empty so client construction can
/// report it.
pub fn ensure_api_key(settings: &mut Settings) -> Result<()> {
    resolve_api_key(
        settings,
        &PROMPTED_KEY,
        std::io::stdin().is_terminal(),
        prompt_hidden,
    )
}

/// Fill the key from `cache`, or from `prompt` when interactive.
///
/// `prompt` runs at most once per cache; its answer is stored there.
fn resolve_api_key<F>(
    settings: &mut Settings,
    cache: &OnceLock<String>,
    is_terminal: bool,
    prompt: F,
) -> Result<()>
where
    F: FnOnce() -> Result<String>,
{
    if settings.has_api_key() {
        return Ok(());
    }

    if let Some(key) = cache.get() {
        settings.llm.api_key = key.clone();
        return Ok(());
    }

    if !is_terminal {
        tracing::debug!("stdin is not a terminal, skipping API key prompt");
        return Ok(());
    }

    let key = prompt()?;
    settings.llm.api_key = cache.get_or_init(|| key).clone();
    Ok(())
}

/// Read the key from the terminal without echoing it.
fn prompt_hidden() -> Result<String> {
    let raw = rpassword::prompt_password(KEY_PROMPT).context("Failed to read API key")?;
    check_key(&raw)
}

/// Prompt on `output` and read a single non-empty key from `input`.
pub fn read_api_key<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{KEY_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read API key")?;

    check_key(&line)
}

fn check_key(raw: &str) -> Result<String> {
    let key = raw.trim();
    if key.is_empty() {
        anyhow::bail!("No API key entered");
    }

    Ok(key.to_string())
}
