//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Text,
    Markdown,
    /// PDF and Word files; these need converting to text before analysis
    BinaryDocument,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "pdf" | "doc" | "docx" => FileType::BinaryDocument,
            _ => FileType::Unknown,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, FileType::Text | FileType::Markdown)
    }
}
