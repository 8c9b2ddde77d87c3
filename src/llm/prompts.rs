//! Few-shot prompt construction for article conversion

use std::path::Path;

use crate::article::{load_examples, FewShotExample, ProcessingRequest};
use crate::Result;

/// Separator placed between the instructions, each example and the task.
pub const EXAMPLE_SEPARATOR: &str = "\n\n---\n\n";

/// Metadata keys the model may emit, with the guidance given for each.
const METADATA_KEYS: [(&str, &str); 5] = [
    ("title", "provide the title in Arabic"),
    ("image_name", "don't create this key if not provided"),
    ("description", "provide a brief description in Arabic"),
    ("date", "don't create this key if not provided"),
    ("author", "don't create this key if not provided"),
];

const INSTRUCTIONS: &str = "You convert articles to markdown and json pairs. \
Here are some examples of the expected input and output format.

Your response must be a valid JSON object with the following required fields:
1. \"markdown\": a string containing the article in markdown format
2. \"json_metadata\": an object with metadata keys
3. \"user_queries\": a list of strings (can be empty if no queries are needed)

## For the markdown:
- Retain the same words, details, and context length.
- **Add proper markdown formatting marks (#, *, etc.) so the article is stylish and readable, with headings, bullets, and so on.**
- DON'T use horizontal lines (-) at all.
- Avoid starting a line with an English character unless the original text does.
- If the article mentions something in a comment, note this as a query.
- Remove any lines asking for comments or opinions.
- Replace article references with \"link to be added\"; don't replace other links.
- Do NOT start the markdown with the title, start with the same words as the original text.
- Do NOT use emojis or other special characters.

## For the metadata:
- Use the provided filename for the image filename if available (don't create a filename key)
- Include the author name if provided
- Only use the exact date if provided
- DO NOT guess or make up any values
- If information isn't explicitly provided, omit the key entirely
- Never use values (date, author, etc.) from the example articles
- Include these keys ONLY:";

const CLOSING_RULES: &str = "Remember:
- Only include metadata fields that are explicitly present
- Use the provided filename for any image references
- Include the author name in metadata if provided
- DO NOT make up any values
- If date wasn't provided, don't include the date field
- Don't copy dates from examples
- *FILTER ANY LINES (-) FROM THE MARKDOWN OUTPUT*

Provide the markdown content and JSON metadata in the required format.";

/// Builds the full few-shot prompt for one article.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    examples: Vec<FewShotExample>,
}

impl PromptBuilder {
    pub fn new(examples: Vec<FewShotExample>) -> Self {
        Self { examples }
    }

    /// Load the bundled examples from `dir`, failing if any file is missing.
    pub fn from_examples_dir(dir: &Path) -> Result<Self> {
        Ok(Self::new(load_examples(dir)?))
    }

    pub fn examples(&self) -> &[FewShotExample] {
        &self.examples
    }

    pub fn build(&self, request: &ProcessingRequest) -> String {
        let mut sections = Vec::with_capacity(self.examples.len() + 2);
        sections.push(instructions());
        sections.extend(self.examples.iter().map(format_example));
        sections.push(task_section(request));
        sections.join(EXAMPLE_SEPARATOR)
    }
}

fn instructions() -> String {
    let mut prefix = INSTRUCTIONS.to_string();
    for (key, hint) in METADATA_KEYS {
        prefix.push_str(&format!("\n    \"{key}\": \"\" ({hint})"));
    }
    prefix.push_str("\n\n**THE ARTICLE SHOULD BE WRITTEN IN ARABIC, KEEP THE ORIGINAL TONE**");
    prefix
}

fn format_example(example: &FewShotExample) -> String {
    format!(
        "Original article:\n{}\n\nProcessed markdown:\n{}\n\nGenerated metadata:\n{}",
        example.input.trim(),
        example.markdown_output.trim(),
        example.json_output.trim()
    )
}

fn task_section(request: &ProcessingRequest) -> String {
    let mut task = format!(
        "Now, process the following article:\n{}\n\nAdditional metadata:",
        request.article_text.trim()
    );

    if let Some(filename) = request.filename() {
        task.push_str(&format!("\nFilename for images: {filename}"));
    }
    if let Some(author) = request.author() {
        task.push_str(&format!("\nAuthor: {author}"));
    }
    if let Some(date) = request.date() {
        task.push_str(&format!("\nDate: {date}"));
    }

    task.push_str("\n\n");
    task.push_str(CLOSING_RULES);
    task
}
