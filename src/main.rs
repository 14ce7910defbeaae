//! Resume matcher: extract resume fields and rank job roles by skill coverage

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, RoleAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::InputManager;
use resume_matcher::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_matcher::output::report::AnalysisReport;
use resume_matcher::processing::{ResumeExtractor, RoleCatalog, RoleMatcher};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Parse { resume, output, save } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let text = read_resume(&resume).await?;

            let extractor = build_extractor(&config)?;
            let record = extractor.extract(&text);

            let report = AnalysisReport::new(source_name(&resume), record);
            emit_report(&report, format, config.output.detailed, &config, save.as_deref())?;
        }

        Commands::Match {
            resume,
            roles,
            output,
            save,
            detailed,
            top,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let catalog = resolve_catalog(roles.as_deref(), &config)?;
            let text = read_resume(&resume).await?;

            let extractor = build_extractor(&config)?;
            let record = extractor.extract(&text);

            let matcher = RoleMatcher::new(catalog);
            let matches = matcher.rank_record(&record);
            info!(
                "Ranked {} roles against {} detected skills",
                matches.len(),
                record.detected_skills().len()
            );

            let report = AnalysisReport::new(source_name(&resume), record).with_matches(
                matches,
                matcher.catalog(),
                &config.tier_thresholds(),
                config.matching.best_match_threshold,
                top,
            );
            emit_report(
                &report,
                format,
                detailed || config.output.detailed,
                &config,
                save.as_deref(),
            )?;
        }

        Commands::Roles { action, roles } => {
            let catalog = resolve_catalog(roles.as_deref(), &config)?;

            match action {
                RoleAction::List => {
                    println!("Roles ({})\n", catalog.len());
                    for role in catalog.roles() {
                        println!(
                            "  {:<20} {:<22} {} skills",
                            role.id,
                            role.role,
                            role.skills.len()
                        );
                    }
                }

                RoleAction::Show { id } => {
                    let role = catalog.get(&id).ok_or_else(|| {
                        let hint = catalog
                            .suggest_id(&id, 0.8)
                            .map(|s| format!(" (did you mean '{}'?)", s))
                            .unwrap_or_default();
                        ResumeMatcherError::InvalidInput(format!("Unknown role id '{}'{}", id, hint))
                    })?;

                    println!("{} [{}]", role.role, role.id);
                    if !role.description.is_empty() {
                        println!("{}", role.description);
                    }
                    println!("\nSkills ({}):", role.skills.len());
                    for skill in &role.skills {
                        println!("  • {}", skill);
                    }
                }
            }
        }

        Commands::Skills => {
            let catalog = config.skill_catalog();
            println!("Skill catalog ({} terms)\n", catalog.len());
            for term in catalog.terms() {
                println!("  • {}", term);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                println!("Configuration reset: {}", path.display());
            }

            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeMatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn resolve_catalog(roles: Option<&Path>, config: &Config) -> Result<RoleCatalog> {
    match roles {
        Some(path) => RoleCatalog::from_path(path),
        None => config.role_catalog(),
    }
}

fn build_extractor(config: &Config) -> Result<ResumeExtractor> {
    ResumeExtractor::with_catalogs(
        config.skill_catalog(),
        config.noise_words(),
        config.extraction_limits(),
    )
}

async fn read_resume(resume: &Path) -> Result<String> {
    cli::validate_file_extension(resume, cli::RESUME_EXTENSIONS)
        .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;

    let mut input_manager = InputManager::new().with_cache(false);
    let text = input_manager.extract_text(resume).await?;
    info!("Read {} characters of resume text", text.chars().count());
    Ok(text)
}

fn source_name(resume: &Path) -> String {
    if resume.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        resume.display().to_string()
    }
}

fn emit_report(
    report: &AnalysisReport,
    format: OutputFormat,
    detailed: bool,
    config: &Config,
    save: Option<&Path>,
) -> Result<()> {
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
    let content = generator.generate_report(report, &format)?;

    match save {
        Some(path) => {
            // A directory gets a generated file name inside it
            let path = if path.is_dir() {
                path.join(suggest_filename(&format, &report.metadata.source, true))
            } else {
                path.to_path_buf()
            };
            save_report_to_file(&content, &path)?;
            println!("Report saved to {}", path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}
