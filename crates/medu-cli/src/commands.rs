use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::Value;

use medu_adapt::AdapterSet;
use medu_corpus::{Corpus, CorpusConfig, LoadReport};
use medu_types::{LevelContent, Severity, ValidationIssue};

use crate::cli::*;
use crate::input::read_raw_entries;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let format = cli.format;
    match cli.command {
        Command::Validate(args) => cmd_validate(args, config, format),
        Command::Coverage(args) => cmd_coverage(args, config, format),
        Command::Show(args) => cmd_show(args, config, format),
        Command::Refs(args) => cmd_refs(args, config, format),
        Command::Tags(args) => cmd_tags(args, config, format),
        Command::Normalize(args) => cmd_normalize(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CorpusConfig> {
    match path {
        Some(path) => CorpusConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(CorpusConfig::default()),
    }
}

fn load(input: &InputArgs, config: CorpusConfig) -> anyhow::Result<(Corpus, LoadReport)> {
    let raw = read_raw_entries(&input.paths)?;
    let mut corpus = Corpus::new(config);
    let report = corpus.load_entries(&raw)?;
    Ok((corpus, report))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_issue(issue: &ValidationIssue) {
    let severity = match issue.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow(),
    };
    let path = if issue.path.is_empty() {
        String::new()
    } else {
        format!(" [{}]", issue.path)
    };
    println!("  {severity} {}{} {}", issue.entry_id.bold(), path.dimmed(), issue.message);
}

fn cmd_validate(args: ValidateArgs, config: CorpusConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (_, report) = load(&args.input, config)?;
    if format == OutputFormat::Json {
        print_json(&report)?;
    } else {
        for issue in &report.issues {
            print_issue(issue);
        }
        println!(
            "{} entries: {} inserted, {} replaced, {} stale, {} rejected, {} unrecognized",
            report.outcomes.len().to_string().bold(),
            report.outcome_count("inserted"),
            report.outcome_count("replaced"),
            report.outcome_count("stale"),
            report.outcome_count("rejected"),
            report.outcome_count("unrecognized"),
        );
        println!(
            "{} errors, {} warnings",
            report.error_count().to_string().red(),
            report.warning_count().to_string().yellow()
        );
    }

    if !report.is_complete() {
        bail!("load is not complete: {} errors", report.error_count());
    }
    if args.deny_warnings && report.warning_count() > 0 {
        bail!("{} warnings (--deny-warnings)", report.warning_count());
    }
    if format == OutputFormat::Text {
        println!("{} Load complete", "✓".green().bold());
    }
    Ok(())
}

fn cmd_coverage(args: InputArgs, config: CorpusConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (corpus, _) = load(&args, config)?;
    let coverage = corpus.coverage()?;
    if format == OutputFormat::Json {
        return print_json(&coverage);
    }
    for entry in coverage.gaps() {
        let mut gaps = Vec::new();
        if !entry.has_name_es {
            gaps.push("nameEs".to_string());
        }
        if !entry.levels_missing_title_es.is_empty() {
            gaps.push(format!("titleEs {:?}", entry.levels_missing_title_es));
        }
        if !entry.levels_missing_body_es.is_empty() {
            gaps.push(format!("bodyEs {:?}", entry.levels_missing_body_es));
        }
        if !entry.levels_partial_body_es.is_empty() {
            gaps.push(format!("partial bodyEs {:?}", entry.levels_partial_body_es));
        }
        println!(
            "  {} {} ({:.0}% of English length)",
            entry.id.bold(),
            gaps.join(", ").yellow(),
            entry.body_ratio * 100.0
        );
    }
    let summary = &coverage.summary;
    println!(
        "{}/{} entries fully translated, mean Spanish/English length {:.0}%",
        summary.fully_translated.to_string().green(),
        summary.entries,
        summary.mean_body_ratio * 100.0
    );
    Ok(())
}

fn cmd_show(args: ShowArgs, config: CorpusConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (corpus, _) = load(&args.input, config)?;
    let query = corpus.query();
    if let Some(level) = args.level {
        let content = query.get_level(&args.id, level)?;
        return match format {
            OutputFormat::Json => print_json(&content),
            OutputFormat::Text => {
                print_level(&content);
                Ok(())
            }
        };
    }

    let entry = query.get_content(&args.id)?;
    if format == OutputFormat::Json {
        return print_json(entry.as_ref());
    }
    println!("{} ({}) v{} {}", entry.name.bold(), entry.id.cyan(), entry.version, entry.status);
    if entry.has_spanish_name() {
        println!("  {}", entry.name_es);
    }
    println!("  digest {}", entry.digest()?.to_string().dimmed());
    for level in entry.levels.values() {
        println!(
            "  L{} {} / {}",
            level.level,
            level.title_primary,
            level.title_primary_es.dimmed()
        );
    }
    for issue in corpus.warnings_for(&args.id) {
        print_issue(issue);
    }
    Ok(())
}

fn print_level(level: &LevelContent) {
    println!("{} {}", format!("Level {}", level.level).bold(), level.title_primary);
    if let Some(reading) = &level.reading_level {
        println!("  Reading level: {reading}");
    }
    println!("\n{}\n", level.body_en);
    if !level.body_es.is_empty() {
        println!("{}\n", level.body_es.dimmed());
    }
    for term in &level.key_terms {
        println!("  {} {}", term.term.cyan(), term.definition);
    }
}

fn cmd_refs(args: RefsArgs, config: CorpusConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (corpus, _) = load(&args.input, config)?;
    let query = corpus.query();
    if args.reverse {
        let referrers = query.referenced_by(&args.id)?;
        if format == OutputFormat::Json {
            return print_json(&referrers);
        }
        for id in referrers {
            println!("  {} -> {}", id.bold(), args.id);
        }
        return Ok(());
    }

    let graph = query.get_cross_reference_graph(&args.id)?;
    if format == OutputFormat::Json {
        return print_json(&graph);
    }
    for edge in graph {
        let state = if edge.resolved {
            "resolved".green()
        } else {
            "unresolved".red()
        };
        println!("  {} {} ({state})", edge.relationship.dimmed(), edge.target_id.bold());
    }
    Ok(())
}

fn cmd_tags(args: TagsArgs, config: CorpusConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (corpus, _) = load(&args.input, config)?;
    let found = corpus.query().find_by_tag(&args.tag)?;
    if format == OutputFormat::Json {
        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        return print_json(&ids);
    }
    for entry in &found {
        println!("  {} {}", entry.id.bold(), entry.name);
    }
    println!("{} entries tagged {}", found.len(), args.tag.yellow());
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let raw = read_raw_entries(&args.input.paths)?;
    let (normalized, failures) = normalize(&AdapterSet::with_default_adapters(), &raw)?;
    for failure in &failures {
        eprintln!("{} {failure}", "skipped".yellow());
    }
    let text = serde_json::to_string_pretty(&Value::Array(normalized))?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green().bold(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Canonical JSON of every adaptable entry, plus a message per failure.
fn normalize(adapters: &AdapterSet, raw: &[Value]) -> anyhow::Result<(Vec<Value>, Vec<String>)> {
    let mut normalized = Vec::new();
    let mut failures = Vec::new();
    for (index, item) in raw.iter().enumerate() {
        match adapters.adapt_at(item, index) {
            Ok(adapted) => {
                for note in adapted.notes.iter().filter(|n| n.is_missing_advisory_field()) {
                    tracing::warn!(entry = %adapted.entry.id, field = %note.path, "missing advisory field");
                }
                normalized.push(serde_json::to_value(&adapted.entry)?);
            }
            Err(err) => failures.push(err.to_string()),
        }
    }
    Ok((normalized, failures))
}
