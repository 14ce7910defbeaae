//! Text extraction from supported input formats

use crate::error::{Result, ResumeMatcherError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        String::from_utf8(bytes).map_err(|_| {
            ResumeMatcherError::InvalidInput(format!(
                "File is not valid UTF-8 text: {}",
                path.display()
            ))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Reads the whole of standard input; the path is ignored
pub struct StdinExtractor;

impl TextExtractor for StdinExtractor {
    async fn extract(&self, _path: &Path) -> Result<String> {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        Ok(content)
    }
}

/// Flatten Markdown to plain text, one block or soft line per output line
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(
                Tag::Paragraph
                | Tag::Heading(..)
                | Tag::Item
                | Tag::CodeBlock(_)
                | Tag::BlockQuote,
            ) => text.push('\n'),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let markdown = "# Jane Doe\n\n**Skills:** Rust, `Docker`\n\n- Python\n- React\n";
        let text = markdown_to_text(markdown);

        assert_eq!(text, "Jane Doe\nSkills: Rust, Docker\nPython\nReact");
    }

    #[test]
    fn test_markdown_soft_breaks_become_lines() {
        let text = markdown_to_text("Jane Doe\njane@example.com");
        assert_eq!(text, "Jane Doe\njane@example.com");
    }
}
