use crate::error::SplitError;
use crate::utils::{
    CONVERSATIONS_DIR, ImportConfig, ImportSummary, ProcessResult, resolve_record_id,
};
use eyre::Result;
use serde_json::value::RawValue;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

const PROGRESS_EVERY: usize = 100;

/// Split `export_path` into `<output_base_dir>/conversations-web-export/<id>.json`
/// files without progress output.
pub fn split(export_path: &Path, output_base_dir: &Path) -> Result<ImportSummary> {
    execute(&ImportConfig {
        export_path: export_path.to_path_buf(),
        output_dir: output_base_dir.to_path_buf(),
        verbose: false,
    })
}

/// The main entry point for the import.
/// Loads the export, then writes every conversation that is not already on disk.
pub fn execute(config: &ImportConfig) -> Result<ImportSummary> {
    if config.verbose {
        eprintln!("Loading {}...", config.export_path.display());
    }
    let conversations = load_export(&config.export_path)?;

    let conv_dir = config.output_dir.join(CONVERSATIONS_DIR);
    fs::create_dir_all(&conv_dir).map_err(|e| SplitError::io(&conv_dir, e))?;

    let total = conversations.len();
    if config.verbose {
        eprintln!("Found {} conversations", total);
    }

    let mut count_imported = 0usize;
    let mut count_skipped = 0usize;

    for (index, conv) in conversations.iter().enumerate() {
        let conv_id = resolve_record_id(conv, index);
        match write_conversation(&conv_dir, &conv_id, conv)? {
            ProcessResult::Skipped => count_skipped += 1,
            ProcessResult::Imported => {
                count_imported += 1;
                if config.verbose && count_imported % PROGRESS_EVERY == 0 {
                    eprintln!("  Processed {}/{}...", count_imported, total);
                }
            }
        }
    }

    Ok(ImportSummary {
        success: true,
        total,
        imported: count_imported,
        skipped: count_skipped,
        output_dir: conv_dir,
    })
}

// Records stay as raw JSON text: only syntax is checked, string escapes and
// number literals are never decoded.
fn load_export(path: &Path) -> Result<Vec<Box<RawValue>>, SplitError> {
    let bytes = fs::read(path).map_err(|e| SplitError::input(path, e.to_string()))?;
    let document: &RawValue = serde_json::from_slice(&bytes)
        .map_err(|e| SplitError::input(path, format!("malformed JSON: {}", e)))?;
    if !document.get().starts_with('[') {
        return Err(SplitError::input(
            path,
            "Expected conversations.json to contain a JSON array",
        ));
    }
    serde_json::from_str(document.get())
        .map_err(|e| SplitError::input(path, format!("malformed JSON: {}", e)))
}

// The first writer of an id wins; an existing file is never opened for writing.
fn write_conversation(
    conv_dir: &Path,
    conv_id: &str,
    conv: &RawValue,
) -> Result<ProcessResult, SplitError> {
    let filepath = conv_dir.join(format!("{}.json", conv_id));

    let file = match OpenOptions::new().write(true).create_new(true).open(&filepath) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(ProcessResult::Skipped),
        Err(e) => return Err(SplitError::io(&filepath, e)),
    };

    let mut writer = BufWriter::new(file);
    writer
        .write_all(conv.get().as_bytes())
        .map_err(|e| SplitError::io(&filepath, e))?;
    writer.flush().map_err(|e| SplitError::io(&filepath, e))?;

    Ok(ProcessResult::Imported)
}
