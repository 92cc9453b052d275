use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skilldeck_core::config::Config;
use skilldeck_core::matcher::SkillMatcher;
use skilldeck_core::registry::SkillRegistry;
use skilldeck_core::resource::discover_resources;
use skilldeck_core::{loader::Skill, prompt};
use skilldeck_lint::sizes::{self, SizeStatus};
use skilldeck_lint::{LintOptions, lint_paths};

mod cli;
mod suggest;

use cli::{Cli, Commands, LintFormat};

const CATALOGUE_MAX: usize = 50;
const SUGGESTION_LIMIT: usize = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("skilldeck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skilldeck=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("skilldeck.toml"));
    let mut config = Config::load(&config_path)?;
    config.skills.paths.extend(cli.paths.iter().cloned());
    tracing::debug!(
        "skills paths: {:?} (config: {})",
        config.skills.paths,
        config_path.display()
    );

    match cli.command {
        Commands::List => {
            let registry = SkillRegistry::load(&config.skills.paths);
            let width = registry
                .all()
                .iter()
                .map(|skill| skill.name().len())
                .max()
                .unwrap_or(0);
            for skill in registry.all() {
                println!("{:width$}  {}", skill.name(), skill.description());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { name, meta } => cmd_show(&config, &name, meta),
        Commands::Match { query, limit } => {
            let registry = SkillRegistry::load(&config.skills.paths);
            let matcher = SkillMatcher::new(registry.all());
            let matched = matcher.match_skills(&query, limit);
            if matched.is_empty() {
                println!("no skills match '{query}'");
            }
            for scored in matched {
                println!(
                    "{:.3}  {:24} {}",
                    scored.score,
                    scored.skill.name(),
                    scored.skill.description(),
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Prompt => {
            let registry = SkillRegistry::load(&config.skills.paths);
            println!("{}", prompt::format_catalogue(registry.all(), CATALOGUE_MAX));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lint { format } => cmd_lint(&config, format),
        Commands::Sizes { markdown } => cmd_sizes(&config, markdown),
    }
}

fn cmd_show(config: &Config, name: &str, meta: bool) -> anyhow::Result<ExitCode> {
    let registry = SkillRegistry::load(&config.skills.paths);
    let Some(skill) = registry.get(name) else {
        let names = registry.all().iter().map(Skill::name);
        let close = suggest::closest_names(name, names, SUGGESTION_LIMIT);
        if close.is_empty() {
            bail!("skill not found: {name}");
        }
        bail!("skill not found: {name} (did you mean {}?)", close.join(", "));
    };

    if meta {
        println!("name: {}", skill.name());
        println!("description: {}", skill.description());
        if let Some(license) = &skill.meta.license {
            println!("license: {license}");
        }
        if let Some(author) = skill.meta.author() {
            println!("author: {author}");
        }
        if let Some(version) = skill.meta.version() {
            println!("version: {version}");
        }
        let tags = skill.meta.tags();
        if !tags.is_empty() {
            println!("tags: {}", tags.join(", "));
        }
    } else {
        let resources = discover_resources(&skill.dir);
        println!("{}", prompt::format_activation(skill, &resources));
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_lint(config: &Config, format: LintFormat) -> anyhow::Result<ExitCode> {
    let options = LintOptions::from(&config.lint);
    let report = lint_paths(&config.skills.paths, &options);

    match format {
        LintFormat::Text => {
            for diagnostic in &report.diagnostics {
                println!("{diagnostic}");
            }
            println!(
                "{} error(s), {} warning(s)",
                report.error_count(),
                report.warning_count(),
            );
        }
        LintFormat::Json => println!("{}", report.to_json()?),
    }

    if report.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn cmd_sizes(config: &Config, markdown: bool) -> anyhow::Result<ExitCode> {
    let options = LintOptions::from(&config.lint);
    let all = sizes::collect(&config.skills.paths, &options);

    if markdown {
        print!("{}", sizes::markdown_table(&all));
    } else {
        for size in &all {
            println!(
                "{:35} {:4} lines  {:5} words  [{}]",
                size.name,
                size.lines,
                size.words,
                size.status.as_str(),
            );
        }
    }

    if all.iter().any(|size| size.status == SizeStatus::TooLong) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
