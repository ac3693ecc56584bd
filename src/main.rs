use chatgpt_export_import::splitter;
use chatgpt_export_import::utils::{self, ImportConfig, ImportSummary};
use clap::Parser;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Import a ChatGPT web export into a format cass can index.
///
/// Splits conversations.json (Settings → Data Controls → Export) into one
/// file per conversation under `conversations-web-export/`.
/// After importing, run `cass index` to index the conversations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to conversations.json from a ChatGPT web export.
    #[arg(value_name = "EXPORT_FILE")]
    export_file: PathBuf,

    /// Base output directory (conversations-web-export/ is created inside).
    /// Defaults to the ChatGPT app support directory.
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/chatgpt-export-import/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result (or error) as a JSON object.
    #[arg(long)]
    json: bool,

    /// Show progress messages. Always on unless --json is given.
    #[arg(short, long)]
    verbose: bool,
}

/// Persisted defaults. Unknown keys are rejected so a typo like `output-dir`
/// does not silently fall back to the app support directory.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    output_dir: Option<PathBuf>,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chatgpt-export-import").join("config.toml"))
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit_path {
        Some(p) if !p.is_file() => {
            return Err(eyre!("--config points at a missing file: {}", p.display()));
        }
        Some(p) => p.to_path_buf(),
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(p) => p,
            None => return Ok(FileConfig::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).wrap_err_with(|| format!("Invalid config {}", path.display()))
}

fn run(cli: &Cli) -> Result<ImportSummary> {
    if !cli.export_file.exists() {
        return Err(eyre!(
            "Export file not found: {}",
            cli.export_file.display()
        ));
    }

    let file_cfg = load_file_config(cli.config.as_deref())?;

    // CLI > Config > platform default
    let output_dir = cli
        .output_dir
        .clone()
        .or(file_cfg.output_dir)
        .or_else(utils::default_output_dir)
        .ok_or_else(|| {
            eyre!("Could not determine output directory.\nUse --output-dir to specify it manually.")
        })?;

    let config = ImportConfig {
        export_path: cli.export_file.clone(),
        output_dir,
        verbose: cli.verbose || !cli.json,
    };

    splitter::execute(&config)
}

fn print_summary(summary: &ImportSummary, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(summary).wrap_err("Failed to serialize result")?;
        println!("{}", out);
    } else {
        println!();
        println!("Import complete!");
        println!("  Total conversations: {}", summary.total);
        println!("  Newly imported:      {}", summary.imported);
        println!("  Skipped (existing):  {}", summary.skipped);
        println!("  Output directory:    {}", summary.output_dir.display());
        println!();
        println!("Next step: Run `cass index` to index the conversations.");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).and_then(|summary| print_summary(&summary, cli.json)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let err = serde_json::json!({ "success": false, "error": format!("{:#}", e) });
                println!("{}", err);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
