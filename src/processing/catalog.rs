//! Skill, noise-word and job-role catalogs
//!
//! Catalogs are immutable values handed to the extractor and matcher at
//! construction time, so callers can swap in their own lists.

use crate::error::{Result, ResumeMatcherError};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_ROLES_JSON: &str = include_str!("../../data/roles.json");

/// Ordered list of skill terms looked up in resume text
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCatalog {
    terms: Vec<String>,
}

impl SkillCatalog {
    /// Build a catalog, dropping blank entries and case-insensitive duplicates.
    /// The first spelling of a term wins and catalog order is preserved.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| t.into().trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
            .collect();

        Self { terms }
    }

    pub fn default_catalog() -> Self {
        Self::new(Self::default_terms().iter().copied())
    }

    /// Append extra terms after the existing ones
    pub fn with_extra<I, S>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms = self
            .terms
            .into_iter()
            .chain(extra.into_iter().map(Into::into));
        Self::new(terms)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Default skill database. Languages come first, then frameworks,
    /// data stores, cloud tooling, design, data science, mobile, testing,
    /// process and soft skills.
    ///
    /// Purely alphabetic one- and two-letter terms ("R", "Go") are left out:
    /// containment matching would find them inside nearly every word. Short
    /// terms with symbols, like "C#", stay.
    fn default_terms() -> &'static [&'static str] {
        &[
            // Programming languages
            "Python", "JavaScript", "TypeScript", "Java", "C++", "C#", "Ruby", "Golang",
            "Rust", "PHP", "Swift", "Kotlin", "SQL", "Bash",

            // Web
            "React", "React Native", "Vue", "Angular", "Node.js", "HTML", "CSS", "SASS",
            "SCSS", "Tailwind", "Bootstrap", "Material UI", "Responsive Design",
            "Accessibility", "Webpack", "Vite", "Babel", "ESLint", "Prettier", "SEO",
            "Performance Optimization",

            // Data stores
            "MySQL", "PostgreSQL", "MongoDB", "Redis", "Firebase", "Supabase",

            // Cloud and infrastructure
            "AWS", "Azure", "GCP", "Docker", "Kubernetes", "CI/CD", "Git", "GitHub",
            "Terraform", "Jenkins", "Ansible", "Linux", "Shell Scripting",

            // Backend and security
            "REST API", "GraphQL", "Microservices", "Security", "OAuth", "JWT",
            "Authentication", "Encryption",

            // Design
            "Figma", "Adobe XD", "Sketch", "Photoshop", "Illustrator",

            // Data science
            "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "NLP",
            "Data Analysis", "Data Visualization", "Tableau", "Power BI", "Excel",
            "Pandas", "NumPy", "Statistics", "Hadoop", "Spark",

            // Mobile
            "Flutter", "iOS", "Android", "Mobile Development",

            // Testing
            "Testing", "Unit Testing", "TDD", "Jest", "Cypress", "Selenium",

            // Process
            "Agile", "Scrum", "JIRA",

            // Soft skills
            "Communication", "Leadership", "Team Management", "Problem Solving",
            "Project Management", "Risk Management", "Stakeholder Management",
        ]
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

/// Header words that disqualify a line from being read as a name
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseWords {
    words: Vec<String>,
}

impl NoiseWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|w| w.into().trim().to_lowercase())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect();

        Self { words }
    }

    pub fn default_words() -> Self {
        Self::new([
            "resume", "curriculum", "vitae", "cv", "profile", "objective",
            "summary", "contact", "details", "information", "personal",
        ])
    }

    pub fn with_extra<I, S>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = self
            .words
            .into_iter()
            .chain(extra.into_iter().map(Into::into));
        Self::new(words)
    }

    /// Case-insensitive substring test against every noise word
    pub fn found_in(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.words.iter().any(|w| lower.contains(w.as_str()))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for NoiseWords {
    fn default() -> Self {
        Self::default_words()
    }
}

/// A job role and the skills it asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    roles: Vec<RoleProfile>,
}

/// Validated, ordered set of role profiles.
///
/// Every role has a unique id and at least one non-blank skill, so
/// percentage computation never divides by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCatalog {
    roles: Vec<RoleProfile>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<RoleProfile>) -> Result<Self> {
        if roles.is_empty() {
            return Err(ResumeMatcherError::Catalog(
                "role catalog contains no roles".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for role in &roles {
            if role.id.trim().is_empty() {
                return Err(ResumeMatcherError::Catalog(format!(
                    "role '{}' has an empty id",
                    role.role
                )));
            }
            if !ids.insert(role.id.as_str()) {
                return Err(ResumeMatcherError::Catalog(format!(
                    "duplicate role id '{}'",
                    role.id
                )));
            }
            if role.skills.is_empty() {
                return Err(ResumeMatcherError::Catalog(format!(
                    "role '{}' lists no skills",
                    role.id
                )));
            }
            if role.skills.iter().any(|s| s.trim().is_empty()) {
                return Err(ResumeMatcherError::Catalog(format!(
                    "role '{}' contains a blank skill",
                    role.id
                )));
            }
        }

        Ok(Self { roles })
    }

    /// Built-in catalog shipped in `data/roles.json`
    pub fn default_catalog() -> Result<Self> {
        Self::from_json_str(DEFAULT_ROLES_JSON)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.roles)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| {
            ResumeMatcherError::Catalog(format!("Failed to parse role catalog: {}", e))
        })?;
        Self::new(file.roles)
    }

    /// Load a catalog file, picking the parser from the extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        let catalog = match extension.as_deref() {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "Role catalog must be .json or .toml: {}",
                    path.display()
                )))
            }
        };

        info!("Loaded {} roles from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    pub fn get(&self, id: &str) -> Option<&RoleProfile> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Closest role id by Jaro-Winkler similarity, if any is at least `threshold`
    pub fn suggest_id(&self, id: &str, threshold: f64) -> Option<&str> {
        let needle = id.to_lowercase();
        self.roles
            .iter()
            .map(|r| (r.id.as_str(), strsim::jaro_winkler(&needle, &r.id.to_lowercase())))
            .filter(|(_, score)| *score >= threshold)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: &str, skills: &[&str]) -> RoleProfile {
        RoleProfile {
            id: id.to_string(),
            role: id.to_uppercase(),
            icon: "Code".to_string(),
            description: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_skill_catalog_dedup_keeps_first_spelling() {
        let catalog = SkillCatalog::new(["Rust", " rust ", "", "Docker", "RUST"]);
        assert_eq!(catalog.terms(), &["Rust".to_string(), "Docker".to_string()]);
    }

    #[test]
    fn test_skill_catalog_extra_terms_appended() {
        let catalog = SkillCatalog::new(["Rust"]).with_extra(["Tokio", "rust"]);
        assert_eq!(catalog.terms(), &["Rust".to_string(), "Tokio".to_string()]);
    }

    #[test]
    fn test_default_skill_catalog() {
        let catalog = SkillCatalog::default_catalog();
        assert!(catalog.len() > 90);
        assert!(catalog
            .terms()
            .iter()
            .all(|t| !(t.len() <= 2 && t.chars().all(|c| c.is_ascii_alphabetic()))));
        assert!(catalog.terms().iter().any(|t| t == "C#"));
        assert!(catalog.terms().iter().all(|t| t.is_ascii()));
    }

    #[test]
    fn test_noise_words_case_insensitive() {
        let noise = NoiseWords::default_words();
        assert!(noise.found_in("RESUME of Jane"));
        assert!(noise.found_in("Personal Details"));
        assert!(!noise.found_in("Jane Doe"));
    }

    #[test]
    fn test_default_role_catalog_loads() {
        let catalog = RoleCatalog::default_catalog().unwrap();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.get("devops-engineer").is_some());
        assert!(catalog.roles().iter().all(|r| !r.skills.is_empty()));
    }

    #[test]
    fn test_role_catalog_rejects_empty_skills() {
        let result = RoleCatalog::new(vec![role("empty", &[])]);
        assert!(matches!(result, Err(ResumeMatcherError::Catalog(_))));
    }

    #[test]
    fn test_role_catalog_rejects_blank_skill() {
        let result = RoleCatalog::new(vec![role("blank", &["Rust", "  "])]);
        assert!(matches!(result, Err(ResumeMatcherError::Catalog(_))));
    }

    #[test]
    fn test_role_catalog_rejects_duplicate_ids() {
        let result = RoleCatalog::new(vec![role("a", &["Rust"]), role("a", &["Go"])]);
        assert!(matches!(result, Err(ResumeMatcherError::Catalog(_))));
    }

    #[test]
    fn test_role_catalog_rejects_empty_catalog() {
        assert!(RoleCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_role_catalog_from_toml() {
        let content = r#"
            [[roles]]
            id = "systems"
            role = "Systems Engineer"
            skills = ["Rust", "Linux"]
        "#;
        let catalog = RoleCatalog::from_toml_str(content).unwrap();
        let systems = catalog.get("systems").unwrap();
        assert_eq!(systems.skills, vec!["Rust", "Linux"]);
        assert!(systems.icon.is_empty());
    }

    #[test]
    fn test_suggest_id() {
        let catalog = RoleCatalog::default_catalog().unwrap();
        assert_eq!(catalog.suggest_id("devops-enginer", 0.8), Some("devops-engineer"));
        assert_eq!(catalog.suggest_id("zzzz", 0.8), None);
    }
}
