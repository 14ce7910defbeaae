//! Resume extraction and role matching engine

pub mod catalog;
pub mod record;
pub mod extractor;
pub mod matcher;

pub use catalog::{NoiseWords, RoleCatalog, RoleProfile, SkillCatalog};
pub use extractor::{ExtractionLimits, ResumeExtractor};
pub use matcher::{best_match, MatchTier, RoleMatch, RoleMatcher, TierThresholds};
pub use record::{EducationEntry, ExperienceEntry, ResumeRecord};
