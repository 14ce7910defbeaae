//! CLI interface for the resume matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Extract resume fields and match skills against job roles")]
#[command(long_about = "Pull name, contact details, skills, education and experience out of a plain-text or Markdown resume, then rank job roles by how many of their skills the resume covers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract structured fields from a resume
    Parse {
        /// Path to resume file (TXT, MD), or - for stdin
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Extract skills from a resume and rank job roles
    Match {
        /// Path to resume file (TXT, MD), or - for stdin
        #[arg(short, long)]
        resume: PathBuf,

        /// Role catalog file (JSON or TOML), overrides the configured one
        #[arg(long)]
        roles: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show matched and missing skills per role
        #[arg(short, long)]
        detailed: bool,

        /// Only show the first N roles
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Inspect the role catalog
    Roles {
        #[command(subcommand)]
        action: RoleAction,

        /// Role catalog file (JSON or TOML), overrides the configured one
        #[arg(long, global = true)]
        roles: Option<PathBuf>,
    },

    /// List the skills the extractor looks for
    Skills,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum RoleAction {
    /// List all roles
    List,

    /// Show one role and its skills
    Show {
        /// Role id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Resume extensions accepted on the command line. Binary documents pass
/// here so the input layer can reject them with a conversion hint.
pub const RESUME_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "pdf", "doc", "docx"];

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension; `-` (stdin) always passes
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    if path.as_os_str() == "-" {
        return Ok(());
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_match_command() {
        let cli = Cli::try_parse_from([
            "resume-matcher", "match", "-r", "cv.txt", "--top", "3", "-o", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Match { resume, top, output, detailed, .. } => {
                assert_eq!(resume, PathBuf::from("cv.txt"));
                assert_eq!(top, Some(3));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(!detailed);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("json"), Ok(OutputFormat::Json));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["txt", "md"];
        assert!(validate_file_extension(Path::new("cv.TXT"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("-"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.pdf"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_binary_resumes_reach_the_input_layer() {
        for name in ["cv.pdf", "cv.DOCX", "cv.md"] {
            assert!(validate_file_extension(Path::new(name), RESUME_EXTENSIONS).is_ok());
        }
        assert!(validate_file_extension(Path::new("cv.xyz"), RESUME_EXTENSIONS).is_err());
    }
}
