//! Resume input: file type detection, text extraction and caching.
//! Plain text and Markdown are read; `-` reads standard input.

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
