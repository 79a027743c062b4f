use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tessera",
    about = "Tessera: immutable document versions and line diffs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file; defaults apply if it does not exist
    #[arg(short, long, global = true, default_value = "tessera.toml")]
    pub config: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a new version of a document from a file
    Commit(CommitArgs),
    /// List the versions of a document, newest first
    Log(LogArgs),
    /// Show a version's metadata
    Show(ShowArgs),
    /// Print a version's raw content
    Cat(CatArgs),
    /// Show line changes between two versions
    Diff(DiffArgs),
    /// Re-hash a version's stored content and compare with its record
    Verify(VerifyArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct CommitArgs {
    /// Document id
    pub document: String,
    /// File holding the snapshot content
    pub file: PathBuf,
    #[arg(short, long)]
    pub message: String,
    #[arg(short, long)]
    pub tag: Option<String>,
    /// Author id; defaults to $USER
    #[arg(long)]
    pub author: Option<String>,
}

#[derive(Args)]
pub struct LogArgs {
    /// Document id
    pub document: String,
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    pub version: String,
}

#[derive(Args)]
pub struct CatArgs {
    pub version: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub base: String,
    pub new: String,
    /// Swap base and new
    #[arg(short, long)]
    pub reverse: bool,
    /// Print the HTML rendering instead of text
    #[arg(long)]
    pub html: bool,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub version: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address
    #[arg(long)]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commit() {
        let cli = Cli::try_parse_from([
            "tessera", "commit", "doc-1", "chapter.html", "-m", "first draft", "--tag", "draft",
        ])
        .unwrap();
        if let Command::Commit(args) = cli.command {
            assert_eq!(args.document, "doc-1");
            assert_eq!(args.file, PathBuf::from("chapter.html"));
            assert_eq!(args.message, "first draft");
            assert_eq!(args.tag, Some("draft".into()));
            assert!(args.author.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn commit_requires_message() {
        assert!(Cli::try_parse_from(["tessera", "commit", "doc", "f.html"]).is_err());
    }

    #[test]
    fn parse_log() {
        let cli = Cli::try_parse_from(["tessera", "log", "doc", "-n", "5", "--oneline"]).unwrap();
        if let Command::Log(args) = cli.command {
            assert_eq!(args.limit, Some(5));
            assert!(args.oneline);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_diff_reverse() {
        let cli = Cli::try_parse_from(["tessera", "diff", "a", "b", "--reverse"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!((args.base.as_str(), args.new.as_str()), ("a", "b"));
            assert!(args.reverse);
            assert!(!args.html);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn global_flags() {
        let cli = Cli::try_parse_from([
            "tessera", "show", "v", "--format", "json", "-c", "alt.toml", "-v",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn default_config_path() {
        let cli = Cli::try_parse_from(["tessera", "serve"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("tessera.toml"));
        assert_eq!(cli.format, OutputFormat::Text);
    }
}
