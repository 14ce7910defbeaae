//! Report structures combining the extracted record with role rankings

use crate::processing::{best_match, MatchTier, ResumeRecord, RoleCatalog, RoleMatch, TierThresholds};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    /// Fields pulled out of the resume text
    pub resume: ResumeRecord,

    /// Ranked roles, best first. Empty for extraction-only reports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<RankedRole>,

    /// Top role when it clears the best-match threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_match: Option<RankedRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub tool_version: String,
    pub roles_evaluated: usize,
}

/// A role match with its tier and the role skills still missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRole {
    #[serde(flatten)]
    pub role_match: RoleMatch,
    pub tier: MatchTier,
    pub missing_skills: Vec<String>,
}

impl AnalysisReport {
    /// Report holding only the extracted record
    pub fn new(source: impl Into<String>, resume: ResumeRecord) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                source: source.into(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                roles_evaluated: 0,
            },
            resume,
            matches: Vec::new(),
            best_match: None,
        }
    }

    /// Attach ranked matches. `top` keeps only the first N entries; the best
    /// match is picked before truncation.
    pub fn with_matches(
        mut self,
        matches: Vec<RoleMatch>,
        catalog: &RoleCatalog,
        thresholds: &TierThresholds,
        best_match_threshold: u8,
        top: Option<usize>,
    ) -> Self {
        let rank = |role_match: &RoleMatch| {
            let missing_skills: Vec<String> = catalog
                .get(&role_match.id)
                .map(|profile| {
                    role_match
                        .missing_skills(profile)
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            RankedRole {
                role_match: role_match.clone(),
                tier: role_match.tier(thresholds),
                missing_skills,
            }
        };

        self.metadata.roles_evaluated = matches.len();
        self.best_match = best_match(&matches, best_match_threshold).map(rank);
        self.matches = matches
            .iter()
            .take(top.unwrap_or(usize::MAX))
            .map(rank)
            .collect();
        self
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{ResumeExtractor, RoleMatcher};

    fn report(top: Option<usize>, threshold: u8) -> AnalysisReport {
        let extractor = ResumeExtractor::new().unwrap();
        let record = extractor.extract("Jane Doe\nSkills: Docker, Kubernetes, AWS, Terraform, Linux");
        let catalog = RoleCatalog::default_catalog().unwrap();
        let matcher = RoleMatcher::new(catalog.clone());
        let matches = matcher.rank_record(&record);

        AnalysisReport::new("resume.txt", record).with_matches(
            matches,
            &catalog,
            &TierThresholds::default(),
            threshold,
            top,
        )
    }

    #[test]
    fn test_report_ranks_all_roles() {
        let report = report(None, 50);

        assert_eq!(report.metadata.roles_evaluated, 8);
        assert_eq!(report.matches.len(), 8);
        assert_eq!(report.matches[0].role_match.id, "devops-engineer");
        assert_eq!(report.matches[0].role_match.percentage, 50);
        assert_eq!(report.matches[0].tier, MatchTier::Moderate);
        assert_eq!(
            report.best_match.as_ref().map(|m| m.role_match.id.as_str()),
            Some("devops-engineer")
        );
    }

    #[test]
    fn test_missing_skills_complement_matched() {
        let report = report(None, 50);
        let top = &report.matches[0];

        assert_eq!(
            top.missing_skills,
            vec!["Azure", "CI/CD", "Jenkins", "Bash", "Ansible"]
        );
        assert_eq!(
            top.missing_skills.len() + top.role_match.matched_skills.len(),
            top.role_match.total_skills
        );
    }

    #[test]
    fn test_top_limits_matches_but_not_best_match() {
        let report = report(Some(2), 50);
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.metadata.roles_evaluated, 8);
        assert!(report.best_match.is_some());
    }

    #[test]
    fn test_best_match_threshold() {
        let report = report(None, 60);
        assert!(report.best_match.is_none());
    }

    #[test]
    fn test_extraction_only_report_serializes_without_matches() {
        let extractor = ResumeExtractor::new().unwrap();
        let report = AnalysisReport::new("-", extractor.extract("xyz"));
        let json = serde_json::to_value(&report).unwrap();

        assert!(!report.has_matches());
        assert!(json.get("matches").is_none());
        assert!(json.get("best_match").is_none());
        assert_eq!(json["resume"]["name"], "Not detected");
    }

    #[test]
    fn test_ranked_role_flattens_match_fields() {
        let report = report(Some(1), 50);
        let json = serde_json::to_value(&report.matches[0]).unwrap();

        assert_eq!(json["id"], "devops-engineer");
        assert_eq!(json["matchedSkills"][0], "Docker");
        assert_eq!(json["tier"], "Moderate");
        assert!(json.get("missingSkills").is_some());
    }
}
