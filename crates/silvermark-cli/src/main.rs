use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use silvermark_config::Config;
use silvermark_syntax::{
    ParseOptions, SyntaxKind, collect_nodes_of_type, debug_tree, extract_hashtag,
    parse_with_options, render_hashtag, render_to_text,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug, Parser)]
#[command(name = "silvermark", version, about = "Inspect silvermark syntax trees")]
struct Cli {
    /// Config file to use instead of ~/.config/silvermark/config.toml
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the syntax tree of a file
    Tree { file: PathBuf },
    /// List the tag names used in a file
    Tags { file: PathBuf },
    /// Verify that files parse back to their exact bytes
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the hashtag for a tag name, escaped if needed
    RenderTag { name: String },
    /// Print the tag name inside a raw hashtag
    ExtractTag { raw: String },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let options = parse_options(cli.config.as_deref())?;

    match cli.command {
        Command::Tree { file } => print!("{}", debug_tree(&parse_file(&file, &options)?)),
        Command::Tags { file } => {
            let tree = parse_file(&file, &options)?;
            for name in tag_names(&tree) {
                println!("{name}");
            }
        }
        Command::Check { files } => {
            let mut failed = 0;
            for file in &files {
                if !round_trips(file, &options)? {
                    eprintln!("{}: tree does not reproduce the file", file.display());
                    failed += 1;
                }
            }
            if failed > 0 {
                eprintln!("{failed} of {} files failed", files.len());
                process::exit(1);
            }
        }
        Command::RenderTag { name } => println!("{}", render_hashtag(&name)),
        Command::ExtractTag { raw } => println!("{}", extract_hashtag(&raw)),
    }

    Ok(())
}

/// Extension toggles from the given config file, the default one, or built-in defaults.
fn parse_options(config: Option<&Path>) -> Result<ParseOptions> {
    let config = match config {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.to_path_buf());
            let config = Config::load_from_path(&path)?;
            if config.is_none() {
                anyhow::bail!("config file '{}' does not exist", path.display());
            }
            config
        }
        None => Config::load()?,
    };

    match config {
        Some(config) => Ok(config.parser),
        None => {
            log::info!(
                "no config at {}, enabling every extension",
                Config::config_path().display()
            );
            Ok(ParseOptions::default())
        }
    }
}

fn parse_file(path: &Path, options: &ParseOptions) -> Result<silvermark_syntax::SyntaxNode> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    log::debug!("parsing {} ({} bytes)", path.display(), source.len());
    Ok(parse_with_options(&source, options))
}

fn tag_names(tree: &silvermark_syntax::SyntaxNode) -> Vec<String> {
    collect_nodes_of_type(tree, SyntaxKind::HASHTAG)
        .iter()
        .map(|tag| extract_hashtag(&tag.text().to_string()).to_string())
        .collect()
}

fn round_trips(path: &Path, options: &ParseOptions) -> Result<bool> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(render_to_text(&parse_with_options(&source, options)) == source)
}
