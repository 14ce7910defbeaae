//! Output formatters for console, JSON and Markdown reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::{AnalysisReport, RankedRole};
use crate::processing::MatchTier;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn tier_color(tier: MatchTier) -> Color {
    match tier {
        MatchTier::Strong => Color::Green,
        MatchTier::Moderate => Color::Yellow,
        MatchTier::Weak => Color::Red,
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_tier_badge(&self, tier: MatchTier) -> String {
        let badge = tier.to_string().to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(tier_color(tier)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_role_line(&self, index: usize, ranked: &RankedRole) -> String {
        let m = &ranked.role_match;
        let percentage = self.colorize(&format!("{:>3}%", m.percentage), tier_color(ranked.tier));
        let mut line = format!(
            "  {:>2}. {:<22} {} {} {}/{} skills\n",
            index + 1,
            m.role,
            percentage,
            self.format_tier_badge(ranked.tier),
            m.matched_skills.len(),
            m.total_skills
        );

        if self.detailed {
            if !m.matched_skills.is_empty() {
                line.push_str(&format!("      matched: {}\n", m.matched_skills.join(", ")));
            }
            if !ranked.missing_skills.is_empty() {
                line.push_str(&format!("      missing: {}\n", ranked.missing_skills.join(", ")));
            }
        }

        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let resume = &report.resume;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Source: {} | Generated: {}\n",
            report.metadata.source,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Candidate", 2));
        output.push_str(&format!("Name:  {}\n", self.colorize(&resume.name, Color::Cyan)));
        output.push_str(&format!("Email: {}\n", resume.email));
        output.push_str(&format!("Phone: {}\n", resume.phone));

        output.push_str(&self.format_header(
            &format!("Skills ({})", resume.detected_skills().len()),
            2,
        ));
        output.push_str(&format!("{}\n", resume.skills.join(", ")));

        if self.detailed {
            output.push_str(&self.format_header("Education", 3));
            for entry in &resume.education {
                output.push_str(&format!(
                    "  • {} | {} ({})\n",
                    entry.degree, entry.institution, entry.year
                ));
            }

            output.push_str(&self.format_header("Experience", 3));
            for entry in &resume.experience {
                output.push_str(&format!(
                    "  • {} | {} ({})\n    {}\n",
                    entry.title, entry.company, entry.duration, entry.description
                ));
            }
        }

        if report.has_matches() {
            output.push_str(&self.format_header("Role Matches", 2));
            for (index, ranked) in report.matches.iter().enumerate() {
                output.push_str(&self.format_role_line(index, ranked));
            }

            match &report.best_match {
                Some(best) => output.push_str(&format!(
                    "\nBest match: {} - {}% match!\n",
                    self.colorize(&best.role_match.role, Color::Green),
                    best.role_match.percentage
                )),
                None => output.push_str("\nNo role is a strong enough match yet.\n"),
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let resume = &report.resume;
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Source:** `{}` | **Version:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.source,
                report.metadata.tool_version
            ));
        }

        output.push_str("## Candidate\n\n");
        output.push_str(&format!("- **Name:** {}\n", resume.name));
        output.push_str(&format!("- **Email:** {}\n", resume.email));
        output.push_str(&format!("- **Phone:** {}\n\n", resume.phone));

        output.push_str("## Skills\n\n");
        output.push_str(&format!("{}\n\n", resume.skills.join(", ")));

        output.push_str("## Education\n\n");
        for entry in &resume.education {
            output.push_str(&format!(
                "- {}, {} ({})\n",
                entry.degree, entry.institution, entry.year
            ));
        }

        output.push_str("\n## Experience\n\n");
        for entry in &resume.experience {
            output.push_str(&format!(
                "- **{}** at {} ({}): {}\n",
                entry.title, entry.company, entry.duration, entry.description
            ));
        }

        if report.has_matches() {
            output.push_str("\n## Role Matches\n\n");

            if let Some(best) = &report.best_match {
                output.push_str(&format!(
                    "**Best match:** {} ({}%)\n\n",
                    best.role_match.role, best.role_match.percentage
                ));
            }

            output.push_str("| # | Role | Match | Tier | Matched Skills |\n");
            output.push_str("|---|------|-------|------|----------------|\n");
            for (index, ranked) in report.matches.iter().enumerate() {
                let m = &ranked.role_match;
                output.push_str(&format!(
                    "| {} | {} | {}% | {} | {} |\n",
                    index + 1,
                    Self::escape_cell(&m.role),
                    m.percentage,
                    ranked.tier,
                    Self::escape_cell(&m.matched_skills.join(", "))
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content).map_err(|e| {
        ResumeMatcherError::OutputFormatting(format!(
            "Failed to write report to {}: {}",
            file_path.display(),
            e
        ))
    })
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty() && stem != "-")
        .unwrap_or_else(|| "resume".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_analysis{}.md", base_name, timestamp_suffix),
    }
}
