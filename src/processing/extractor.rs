//! Pattern-based extraction of resume fields from plain text
//!
//! Every field is an independent best-effort pass over the same text. A pass
//! that finds nothing yields a sentinel value rather than an error, so
//! `extract` always returns a fully populated record.

use crate::error::{Result, ResumeMatcherError};
use crate::processing::catalog::{NoiseWords, SkillCatalog};
use crate::processing::record::*;
use aho_corasick::AhoCorasick;
use log::debug;
use regex::Regex;
use std::collections::HashSet;

/// Ordered phone patterns, most specific first
const PHONE_PATTERNS: &[&str] = &[
    // +91 followed by 10 digits
    r"\+91[-.\s]?([0-9]{10})",
    r"\+91[-.\s]?([0-9]{5})[-.\s]?([0-9]{5})",
    // Any country code
    r"\+[0-9]{1,3}[-.\s]?([0-9]{10})",
    r"\+[0-9]{1,3}[-.\s]?([0-9]{3})[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})",
    // Bare 10 digit formats
    r"(?:^|\s)([0-9]{10})(?:\s|$)",
    r"(?:^|\s)([0-9]{3})[-.\s]([0-9]{3})[-.\s]([0-9]{4})(?:\s|$)",
    r"(?:^|\s)([0-9]{5})[-.\s]([0-9]{5})(?:\s|$)",
    // Parenthesized area code
    r"\(([0-9]{3})\)[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})",
    // Labelled numbers
    r"(?i)(?:phone|mobile|tel|cell|contact)[-:\s]*\+?[0-9]*[-.\s]?([0-9]{10})",
    r"(?i)(?:phone|mobile|tel|cell|contact)[-:\s]*\+?[0-9]*[-.\s]?([0-9]{3})[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})",
];

type NameRule = fn(&ResumeExtractor, &str) -> Option<String>;

/// Name strategies in priority order; the first hit wins
const NAME_RULES: &[(&str, NameRule)] = &[
    ("header lines", ResumeExtractor::name_from_header_lines),
    ("name label", ResumeExtractor::name_from_label),
    ("capitalized line", ResumeExtractor::name_from_capitalized_line),
];

/// How far the extractor looks and how many entries it keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub name_scan_lines: usize,
    pub max_education_entries: usize,
    pub max_experience_entries: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            name_scan_lines: 5,
            max_education_entries: 2,
            max_experience_entries: 3,
        }
    }
}

pub struct ResumeExtractor {
    skills: SkillCatalog,
    skill_matcher: Option<AhoCorasick>,
    noise_words: NoiseWords,
    limits: ExtractionLimits,
    email_regex: Regex,
    digit_triplet_regex: Regex,
    name_label_regex: Regex,
    capitalized_line_regex: Regex,
    whitespace_regex: Regex,
    phone_patterns: Vec<Regex>,
    phone_fallback_regex: Regex,
    education_regex: Regex,
    year_regex: Regex,
    experience_regex: Regex,
}

impl ResumeExtractor {
    /// Extractor over the built-in skill catalog and noise words
    pub fn new() -> Result<Self> {
        Self::with_catalogs(
            SkillCatalog::default_catalog(),
            NoiseWords::default_words(),
            ExtractionLimits::default(),
        )
    }

    pub fn with_catalogs(
        skills: SkillCatalog,
        noise_words: NoiseWords,
        limits: ExtractionLimits,
    ) -> Result<Self> {
        // ASCII folding is enough: catalog terms are plain ASCII
        let skill_matcher = if skills.is_empty() {
            None
        } else {
            let matcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(skills.terms())
                .map_err(|e| {
                    ResumeMatcherError::Catalog(format!("Failed to build skill matcher: {}", e))
                })?;
            Some(matcher)
        };

        let phone_patterns = PHONE_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            skills,
            skill_matcher,
            noise_words,
            limits,
            email_regex: Regex::new(r"[\w.-]+@[\w.-]+\.\w+")?,
            digit_triplet_regex: Regex::new(r"[0-9]{3}")?,
            name_label_regex: Regex::new(r"(?i)name\s*[:\-]\s*([a-z]+(?:[ \t]+[a-z]+)+)")?,
            capitalized_line_regex: Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}$")?,
            whitespace_regex: Regex::new(r"\s+")?,
            phone_patterns,
            phone_fallback_regex: Regex::new(r"[0-9]{10,13}")?,
            education_regex: Regex::new(
                r"(?i)\b(?:bachelor|b\.?s\.?|master|m\.?s\.?|ph\.?d\.?|mba|degree|diploma)[ \t\w]*",
            )?,
            year_regex: Regex::new(r"\b(?:19|20)[0-9]{2}\b")?,
            experience_regex: Regex::new(
                r"(?i)\b(?:software engineer|developer|designer|manager|analyst|consultant|intern)[ \t\w]*",
            )?,
        })
    }

    /// Extract every field from `text`. Never fails.
    pub fn extract(&self, text: &str) -> ResumeRecord {
        let record = ResumeRecord {
            name: self.detect_name(text),
            email: self.detect_email(text),
            phone: self.detect_phone(text),
            skills: self.detect_skills(text),
            education: self.detect_education(text),
            experience: self.detect_experience(text),
        };

        debug!(
            "Extracted record: name={}, email={}, phone={}, {} skills, {} education, {} experience",
            record.has_name(),
            record.has_email(),
            record.has_phone(),
            record.detected_skills().len(),
            record.education.len(),
            record.experience.len()
        );

        record
    }

    pub fn detect_name(&self, text: &str) -> String {
        NAME_RULES
            .iter()
            .find_map(|(label, rule)| {
                let name = rule(self, text)?;
                debug!("Name detected via {} rule", label);
                Some(name)
            })
            .unwrap_or_else(|| NOT_DETECTED.to_string())
    }

    pub fn detect_email(&self, text: &str) -> String {
        self.email_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_DETECTED.to_string())
    }

    /// Normalized 10-digit phone number with any country code dropped
    pub fn detect_phone(&self, text: &str) -> String {
        let collapsed = self.whitespace_regex.replace_all(text, " ");

        self.phone_patterns
            .iter()
            .find_map(|pattern| {
                let captures = pattern.captures(&collapsed)?;
                let digits: String = captures
                    .iter()
                    .skip(1)
                    .flatten()
                    .flat_map(|group| group.as_str().chars())
                    .filter(char::is_ascii_digit)
                    .collect();
                last_ten_digits(&digits)
            })
            .or_else(|| {
                debug!("No phone pattern matched, scanning for a bare digit run");
                self.phone_fallback_regex
                    .find(text)
                    .and_then(|m| last_ten_digits(m.as_str()))
            })
            .unwrap_or_else(|| NOT_DETECTED.to_string())
    }

    /// Catalog skills contained in the text, in catalog order
    pub fn detect_skills(&self, text: &str) -> Vec<String> {
        let found: HashSet<usize> = match &self.skill_matcher {
            Some(matcher) => matcher
                .find_overlapping_iter(text)
                .map(|mat| mat.pattern().as_usize())
                .collect(),
            None => HashSet::new(),
        };

        let skills: Vec<String> = self
            .skills
            .terms()
            .iter()
            .enumerate()
            .filter(|(idx, _)| found.contains(idx))
            .map(|(_, term)| term.clone())
            .collect();

        if skills.is_empty() {
            vec![NO_SKILLS_DETECTED.to_string()]
        } else {
            skills
        }
    }

    pub fn detect_education(&self, text: &str) -> Vec<EducationEntry> {
        let entries: Vec<EducationEntry> = self
            .education_regex
            .find_iter(text)
            .take(self.limits.max_education_entries)
            .map(|m| EducationEntry {
                degree: m.as_str().trim().to_string(),
                institution: PLACEHOLDER_INSTITUTION.to_string(),
                year: self
                    .year_regex
                    .find(&text[m.start()..])
                    .map(|year| year.as_str().to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            })
            .collect();

        if entries.is_empty() {
            vec![EducationEntry::not_detected()]
        } else {
            entries
        }
    }

    pub fn detect_experience(&self, text: &str) -> Vec<ExperienceEntry> {
        let entries: Vec<ExperienceEntry> = self
            .experience_regex
            .find_iter(text)
            .take(self.limits.max_experience_entries)
            .map(|m| ExperienceEntry {
                title: m.as_str().trim().to_string(),
                company: PLACEHOLDER_COMPANY.to_string(),
                duration: PLACEHOLDER_DURATION.to_string(),
                description: PLACEHOLDER_DESCRIPTION.to_string(),
            })
            .collect();

        if entries.is_empty() {
            vec![ExperienceEntry::not_detected()]
        } else {
            entries
        }
    }

    pub fn skill_catalog(&self) -> &SkillCatalog {
        &self.skills
    }

    pub fn limits(&self) -> ExtractionLimits {
        self.limits
    }

    /// First lines of the document that look like a bare name
    fn name_from_header_lines(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.limits.name_scan_lines)
            .filter(|line| !self.is_header_or_contact_line(line))
            .find_map(|line| {
                let cleaned: String = line
                    .chars()
                    .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
                    .collect();
                let cleaned = cleaned.trim();
                let token_count = cleaned.split_whitespace().count();

                if cleaned.chars().count() > 3 && (2..=4).contains(&token_count) {
                    Some(cleaned.to_string())
                } else {
                    None
                }
            })
    }

    /// "Name: Jane Doe" style labels anywhere in the text
    fn name_from_label(&self, text: &str) -> Option<String> {
        self.name_label_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// First line made of 2-4 capitalized words. A noise word in that line
    /// ends the search.
    fn name_from_capitalized_line(&self, text: &str) -> Option<String> {
        let candidate = text
            .lines()
            .find(|line| self.capitalized_line_regex.is_match(line))?;

        if self.noise_words.found_in(candidate) {
            None
        } else {
            Some(candidate.trim().to_string())
        }
    }

    fn is_header_or_contact_line(&self, line: &str) -> bool {
        self.noise_words.found_in(line)
            || line.contains('@')
            || self.digit_triplet_regex.is_match(line)
            || line.contains("http")
            || line.contains("www")
    }
}

/// Accept 10-13 digits and keep the last 10
fn last_ten_digits(digits: &str) -> Option<String> {
    if (10..=13).contains(&digits.len()) {
        Some(digits[digits.len() - 10..].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ResumeExtractor {
        ResumeExtractor::new().unwrap()
    }

    #[test]
    fn test_basic_contact_block() {
        let text = "John Smith\njohn.smith@email.com\n+1 555-123-4567\nSkills: Python, React, Docker";
        let record = extractor().extract(text);

        assert_eq!(record.name, "John Smith");
        assert_eq!(record.email, "john.smith@email.com");
        assert_eq!(record.phone, "5551234567");
        assert_eq!(record.skills, vec!["Python", "React", "Docker"]);
    }

    #[test]
    fn test_nothing_detected() {
        let record = extractor().extract("xyz abc 123");

        assert_eq!(record.name, NOT_DETECTED);
        assert_eq!(record.email, NOT_DETECTED);
        assert_eq!(record.phone, NOT_DETECTED);
        assert_eq!(record.skills, vec![NO_SKILLS_DETECTED]);
        assert_eq!(record.education, vec![EducationEntry::not_detected()]);
        assert_eq!(record.experience, vec![ExperienceEntry::not_detected()]);
    }

    #[test]
    fn test_lists_never_empty() {
        let extractor = extractor();
        for text in ["", "   \n\n", "xyz", "Bachelor", "Developer", "Rust"] {
            let record = extractor.extract(text);
            assert!(!record.skills.is_empty());
            assert!(!record.education.is_empty());
            assert!(!record.experience.is_empty());
        }
    }

    #[test]
    fn test_name_skips_header_lines() {
        let text = "Resume\nJane Marie Doe\njane@example.io";
        assert_eq!(extractor().detect_name(text), "Jane Marie Doe");
    }

    #[test]
    fn test_name_length_counts_characters() {
        // Three characters, five bytes
        assert_eq!(extractor().detect_name("A\u{2003}B"), NOT_DETECTED);
    }

    #[test]
    fn test_name_from_label() {
        let text = "Personal Information\nName: Alice Walker, ID 12345\nContact: alice@example.com";
        assert_eq!(extractor().detect_name(text), "Alice Walker");
    }

    #[test]
    fn test_name_from_capitalized_line() {
        let text = "Profile\nPhone 555 010 9999\nalice@example.com\nSummary of work\nReferences 123\nGrace Hopper\n";
        assert_eq!(extractor().detect_name(text), "Grace Hopper");
    }

    #[test]
    fn test_capitalized_line_with_noise_word_stops_search() {
        let text = "Personal Details\nphone 5551234567\nme@example.com\nwww.example.com\nsee 2020 notes\nGrace Hopper";
        assert_eq!(extractor().detect_name(text), NOT_DETECTED);
    }

    #[test]
    fn test_phone_strips_country_code() {
        assert_eq!(extractor().detect_phone("Call +91-9876543210"), "9876543210");
    }

    #[test]
    fn test_phone_formats() {
        let extractor = extractor();
        assert_eq!(extractor.detect_phone("(555) 123-4567"), "5551234567");
        assert_eq!(extractor.detect_phone("Mobile: 98765 43210"), "9876543210");
        assert_eq!(extractor.detect_phone("+91 98765\n\n43210"), "9876543210");
        assert_eq!(extractor.detect_phone("reach me at 555.123.4567 anytime"), "5551234567");
    }

    #[test]
    fn test_phone_fallback_digit_run() {
        assert_eq!(extractor().detect_phone("ID:0019876543210X"), "9876543210");
    }

    #[test]
    fn test_phone_not_detected() {
        assert_eq!(extractor().detect_phone("call 123-45"), NOT_DETECTED);
    }

    #[test]
    fn test_skills_case_insensitive_in_catalog_order() {
        let skills = extractor().detect_skills("worked with DOCKER, kubernetes and python");
        assert_eq!(skills, vec!["Python", "Docker", "Kubernetes"]);
    }

    #[test]
    fn test_skills_with_synthetic_catalog() {
        let extractor = ResumeExtractor::with_catalogs(
            SkillCatalog::new(["Tokio", "Serde"]),
            NoiseWords::default_words(),
            ExtractionLimits::default(),
        )
        .unwrap();

        assert_eq!(extractor.detect_skills("serde and tokio"), vec!["Tokio", "Serde"]);
        assert_eq!(extractor.detect_skills("python"), vec![NO_SKILLS_DETECTED]);
    }

    #[test]
    fn test_empty_skill_catalog() {
        let extractor = ResumeExtractor::with_catalogs(
            SkillCatalog::new(Vec::<String>::new()),
            NoiseWords::default_words(),
            ExtractionLimits::default(),
        )
        .unwrap();

        assert_eq!(extractor.detect_skills("Python"), vec![NO_SKILLS_DETECTED]);
    }

    #[test]
    fn test_education_with_years() {
        let text = "Bachelor of Science in Computer Science, MIT 2016\nMBA from Wharton 2020\nDiploma in Design 2010";
        let education = extractor().detect_education(text);

        assert_eq!(education.len(), 2);
        assert_eq!(education[0].degree, "Bachelor of Science in Computer Science");
        assert_eq!(education[0].institution, PLACEHOLDER_INSTITUTION);
        assert_eq!(education[0].year, "2016");
        assert_eq!(education[1].degree, "MBA from Wharton 2020");
        assert_eq!(education[1].year, "2020");
    }

    #[test]
    fn test_education_year_missing() {
        let education = extractor().detect_education("Diploma in Graphic Design");
        assert_eq!(education[0].degree, "Diploma in Graphic Design");
        assert_eq!(education[0].year, NOT_AVAILABLE);
    }

    #[test]
    fn test_experience_titles() {
        let text = "Senior Software Engineer at Acme\nData Analyst, Globex\nIntern at Initech\nProduct Manager";
        let experience = extractor().detect_experience(text);

        let titles: Vec<&str> = experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Software Engineer at Acme", "Analyst", "Intern at Initech"]);
        assert!(experience.iter().all(|e| e.company == PLACEHOLDER_COMPANY));
    }

    #[test]
    fn test_custom_limits() {
        let limits = ExtractionLimits {
            name_scan_lines: 1,
            max_education_entries: 1,
            max_experience_entries: 1,
        };
        let extractor = ResumeExtractor::with_catalogs(
            SkillCatalog::default_catalog(),
            NoiseWords::default_words(),
            limits,
        )
        .unwrap();

        let experience = extractor.detect_experience("Developer\nDesigner");
        assert_eq!(experience.len(), 1);
        assert_eq!(experience[0].title, "Developer");
    }

    #[test]
    fn test_extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResumeExtractor>();
    }
}
