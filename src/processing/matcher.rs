//! Role matching: score a skill list against every role in a catalog

use crate::processing::catalog::{RoleCatalog, RoleProfile};
use crate::processing::record::ResumeRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMatch {
    pub id: String,
    pub role: String,
    pub icon: String,
    pub description: String,
    pub percentage: u8,
    pub matched_skills: Vec<String>,
    pub total_skills: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    Strong,
    Moderate,
    Weak,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTier::Strong => write!(f, "Strong"),
            MatchTier::Moderate => write!(f, "Moderate"),
            MatchTier::Weak => write!(f, "Weak"),
        }
    }
}

/// Lower bounds (inclusive) for the strong and moderate tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub strong: u8,
    pub moderate: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            strong: 70,
            moderate: 40,
        }
    }
}

impl RoleMatch {
    pub fn tier(&self, thresholds: &TierThresholds) -> MatchTier {
        if self.percentage >= thresholds.strong {
            MatchTier::Strong
        } else if self.percentage >= thresholds.moderate {
            MatchTier::Moderate
        } else {
            MatchTier::Weak
        }
    }

    /// Role skills that were not matched, in role order
    pub fn missing_skills<'a>(&self, profile: &'a RoleProfile) -> Vec<&'a str> {
        profile
            .skills
            .iter()
            .filter(|skill| !self.matched_skills.contains(*skill))
            .map(String::as_str)
            .collect()
    }
}

pub struct RoleMatcher {
    catalog: RoleCatalog,
}

impl RoleMatcher {
    pub fn new(catalog: RoleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Score every role against `skills` and sort by percentage, highest
    /// first. The sort is stable, so equal scores keep catalog order.
    ///
    /// Skills are trimmed and lowercased; entries that end up empty are
    /// dropped, since an empty string would be contained in every role skill.
    pub fn rank<S: AsRef<str>>(&self, skills: &[S]) -> Vec<RoleMatch> {
        let normalized: Vec<String> = skills
            .iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let mut matches: Vec<RoleMatch> = self
            .catalog
            .roles()
            .iter()
            .map(|role| score_role(role, &normalized))
            .collect();

        matches.sort_by(|a, b| b.percentage.cmp(&a.percentage));

        debug!(
            "Ranked {} roles against {} skills",
            matches.len(),
            normalized.len()
        );
        matches
    }

    /// Rank the skills a record actually detected. The "no skills" fallback
    /// entry is not treated as a skill, so a record without skills scores 0%
    /// for every role.
    pub fn rank_record(&self, record: &ResumeRecord) -> Vec<RoleMatch> {
        self.rank(record.detected_skills())
    }
}

/// Top match when it reaches `threshold` percent
pub fn best_match(matches: &[RoleMatch], threshold: u8) -> Option<&RoleMatch> {
    matches.first().filter(|m| m.percentage >= threshold)
}

fn score_role(role: &RoleProfile, normalized_skills: &[String]) -> RoleMatch {
    let matched_skills: Vec<String> = role
        .skills
        .iter()
        .filter(|skill| {
            let skill = skill.to_lowercase();
            normalized_skills
                .iter()
                .any(|user| user.contains(&skill) || skill.contains(user.as_str()))
        })
        .cloned()
        .collect();

    let total_skills = role.skills.len();

    RoleMatch {
        id: role.id.clone(),
        role: role.role.clone(),
        icon: role.icon.clone(),
        description: role.description.clone(),
        percentage: round_percentage(matched_skills.len(), total_skills),
        matched_skills,
        total_skills,
    }
}

/// `matched / total` as a whole percentage, rounding halves up.
/// `total` is never zero: `RoleCatalog` rejects roles without skills.
fn round_percentage(matched: usize, total: usize) -> u8 {
    ((matched * 200 + total) / (total * 2)) as u8
}
