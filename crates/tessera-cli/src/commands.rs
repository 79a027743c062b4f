use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use tessera_diff::{DiffKind, DiffResult};
use tessera_sdk::{DocumentId, NewVersion, Tessera, Version, VersionId};
use tessera_server::{TesseraConfig, TesseraServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = TesseraConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let format = cli.format;

    match cli.command {
        Command::Commit(args) => cmd_commit(&open(&config)?, args, format),
        Command::Log(args) => cmd_log(&open(&config)?, args, format),
        Command::Show(args) => cmd_show(&open(&config)?, args, format),
        Command::Cat(args) => cmd_cat(&open(&config)?, args),
        Command::Diff(args) => cmd_diff(&open(&config)?, args, format),
        Command::Verify(args) => cmd_verify(&open(&config)?, args, format),
        Command::Serve(args) => cmd_serve(config, args),
    }
}

fn open(config: &TesseraConfig) -> anyhow::Result<Tessera> {
    Tessera::open_with(
        &config.storage_root,
        Arc::new(config.registry()),
        config.version_store_config(),
    )
    .with_context(|| format!("opening store at {}", config.storage_root.display()))
}

fn parse_document(raw: &str) -> anyhow::Result<DocumentId> {
    raw.parse()
        .with_context(|| format!("invalid document id: {raw}"))
}

fn parse_version(raw: &str) -> anyhow::Result<VersionId> {
    raw.parse()
        .with_context(|| format!("invalid version id: {raw}"))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_commit(tessera: &Tessera, args: CommitArgs, format: OutputFormat) -> anyhow::Result<()> {
    let document = parse_document(&args.document)?;
    let content = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let author = match args.author.or_else(|| std::env::var("USER").ok()) {
        Some(author) => author,
        None => bail!("no author given; pass --author or set $USER"),
    };

    let mut request = NewVersion::new(document, content, args.message, author);
    request.tag = args.tag;
    let version = tessera.create_version(request)?;

    if format == OutputFormat::Json {
        return print_json(&version);
    }
    println!(
        "{} Created version {} of {}",
        "✓".green().bold(),
        version.version_number.to_string().yellow().bold(),
        document.short_id().cyan()
    );
    println!("  Id:   {}", version.id);
    println!("  Hash: {}", version.content_hash.to_hex().dimmed());
    println!("  Size: {} bytes", version.size);
    Ok(())
}

fn cmd_log(tessera: &Tessera, args: LogArgs, format: OutputFormat) -> anyhow::Result<()> {
    let document = parse_document(&args.document)?;
    let mut versions = tessera.list_versions(&document)?;
    if let Some(limit) = args.limit {
        versions.truncate(limit);
    }

    if format == OutputFormat::Json {
        return print_json(&versions);
    }
    if versions.is_empty() {
        println!("No versions.");
        return Ok(());
    }
    for v in &versions {
        if args.oneline {
            println!(
                "{} {} {}",
                format!("v{}", v.version_number).yellow(),
                v.id.short_id().dimmed(),
                v.commit_message
            );
        } else {
            print_version(v);
            println!();
        }
    }
    Ok(())
}

fn cmd_show(tessera: &Tessera, args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let version = tessera.get_version(&parse_version(&args.version)?)?;
    if format == OutputFormat::Json {
        return print_json(&version);
    }
    print_version(&version);
    Ok(())
}

fn cmd_cat(tessera: &Tessera, args: CatArgs) -> anyhow::Result<()> {
    let content = tessera.get_version_content(&parse_version(&args.version)?)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_diff(tessera: &Tessera, args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (base, new) = (parse_version(&args.base)?, parse_version(&args.new)?);
    let diff = if args.reverse {
        tessera.compare_versions_reversed(&base, &new)?
    } else {
        tessera.compare_versions(&base, &new)?
    };

    if format == OutputFormat::Json {
        return print_json(&diff);
    }
    if args.html {
        println!("{}", diff.html);
        return Ok(());
    }
    print_diff(&diff);
    Ok(())
}

fn cmd_verify(tessera: &Tessera, args: VerifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = tessera.verify_version(&parse_version(&args.version)?)?;
    if format == OutputFormat::Json {
        print_json(&report)?;
    } else if report.is_intact() {
        println!(
            "{} {} intact ({})",
            "✓".green().bold(),
            report.version.label(),
            report.actual_hash.short_hex().dimmed()
        );
    } else {
        println!("{} {} does not match its record", "✗".red().bold(), report.version.label());
        println!("  Expected: {} ({} bytes)", report.version.content_hash, report.version.size);
        println!("  Actual:   {} ({} bytes)", report.actual_hash, report.actual_size);
    }
    if !report.is_intact() {
        bail!("version {} failed verification", report.version.id);
    }
    Ok(())
}

fn cmd_serve(mut config: TesseraConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address: {bind}"))?;
    }
    println!(
        "Tessera server on {} (root: {})",
        config.bind_addr.to_string().bold(),
        config.storage_root.display()
    );
    let server = TesseraServer::open(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn print_version(v: &Version) {
    println!(
        "{}  {}",
        format!("v{}", v.version_number).yellow().bold(),
        v.id.to_string().dimmed()
    );
    println!("  Author:  {}", v.author_id.as_str());
    println!("  Date:    {}", v.created_at.to_rfc3339());
    println!("  Hash:    {}", v.content_hash.short_hex());
    println!("  Size:    {} bytes", v.size);
    if let Some(tag) = &v.tag {
        println!("  Tag:     {}", tag.cyan());
    }
    println!("  Message: {}", v.commit_message);
}

fn print_diff(diff: &DiffResult) {
    println!("{} {}", "---".red(), diff.base.label());
    println!("{} {}", "+++".green(), diff.new.label());
    for entry in &diff.entries {
        let line = format!("{}{}", entry.kind.prefix(), entry.value);
        match entry.kind {
            DiffKind::Added => println!("{}", line.green()),
            DiffKind::Removed => println!("{}", line.red()),
            DiffKind::Context => println!("{line}"),
        }
    }
    println!(
        "{} added, {} removed, {} modified",
        diff.added.to_string().green(),
        diff.removed.to_string().red(),
        diff.modified.to_string().yellow()
    );
}
