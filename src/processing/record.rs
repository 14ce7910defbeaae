//! Structured resume record produced by the extractor

use serde::{Deserialize, Serialize};

/// Sentinel for a scalar field nothing could be found for
pub const NOT_DETECTED: &str = "Not detected";

/// Sentinel for a missing year or duration
pub const NOT_AVAILABLE: &str = "N/A";

/// Single-entry fallback for the skills list
pub const NO_SKILLS_DETECTED: &str = "No skills detected";

pub const PLACEHOLDER_INSTITUTION: &str = "University";
pub const PLACEHOLDER_COMPANY: &str = "Company Name";
pub const PLACEHOLDER_DURATION: &str = "Duration not detected";
pub const PLACEHOLDER_DESCRIPTION: &str = "Experience details parsed from resume";
pub const MISSING_EXPERIENCE_DESCRIPTION: &str = "Experience not detected from resume";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

impl EducationEntry {
    pub fn not_detected() -> Self {
        Self {
            degree: NOT_DETECTED.to_string(),
            institution: NOT_DETECTED.to_string(),
            year: NOT_AVAILABLE.to_string(),
        }
    }
}

impl ExperienceEntry {
    pub fn not_detected() -> Self {
        Self {
            title: NOT_DETECTED.to_string(),
            company: NOT_DETECTED.to_string(),
            duration: NOT_AVAILABLE.to_string(),
            description: MISSING_EXPERIENCE_DESCRIPTION.to_string(),
        }
    }
}

impl ResumeRecord {
    /// Skills that were actually found, without the fallback entry
    pub fn detected_skills(&self) -> &[String] {
        if self.has_skills() {
            &self.skills
        } else {
            &[]
        }
    }

    pub fn has_skills(&self) -> bool {
        !(self.skills.len() == 1 && self.skills[0] == NO_SKILLS_DETECTED)
    }

    pub fn has_name(&self) -> bool {
        self.name != NOT_DETECTED
    }

    pub fn has_email(&self) -> bool {
        self.email != NOT_DETECTED
    }

    pub fn has_phone(&self) -> bool {
        self.phone != NOT_DETECTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_skills(skills: &[&str]) -> ResumeRecord {
        ResumeRecord {
            name: NOT_DETECTED.to_string(),
            email: NOT_DETECTED.to_string(),
            phone: NOT_DETECTED.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            education: vec![EducationEntry::not_detected()],
            experience: vec![ExperienceEntry::not_detected()],
        }
    }

    #[test]
    fn test_detected_skills_hides_fallback() {
        let record = record_with_skills(&[NO_SKILLS_DETECTED]);
        assert!(!record.has_skills());
        assert!(record.detected_skills().is_empty());

        let record = record_with_skills(&["Rust", "Docker"]);
        assert!(record.has_skills());
        assert_eq!(record.detected_skills().len(), 2);
    }

    #[test]
    fn test_sentinel_checks() {
        let record = record_with_skills(&[NO_SKILLS_DETECTED]);
        assert!(!record.has_name());
        assert!(!record.has_email());
        assert!(!record.has_phone());
    }

    #[test]
    fn test_json_field_names() {
        let record = record_with_skills(&["Rust"]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["education"][0]["year"], "N/A");
        assert_eq!(json["experience"][0]["description"], MISSING_EXPERIENCE_DESCRIPTION);
    }
}
