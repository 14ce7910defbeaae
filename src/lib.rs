//! Resume matcher library
//!
//! Extracts structured fields from resume text and ranks job roles by skill
//! coverage. The engine lives in [`processing`]; the other modules are the
//! file input, configuration and report plumbing around it.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use processing::{ResumeExtractor, ResumeRecord, RoleCatalog, RoleMatch, RoleMatcher};
