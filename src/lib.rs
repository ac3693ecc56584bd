//! # chatgpt-export-import
//!
//! Splits a ChatGPT web export into files that `cass`
//! can index without the desktop app's encryption key.
//!
//! ## Why
//!
//! The ChatGPT Mac app stores newer conversations encrypted (`conversations-v2-*`,
//! `conversations-v3-*`) with a key only OpenAI-signed apps can read. The web export
//! (Settings → Data Controls → Export) ships the same JSON unencrypted, but as one big
//! `conversations.json` array.
//!
//! This tool writes every element of that array to
//! `<output-dir>/conversations-web-export/<id>.json`. A directory named
//! `conversations-*` without a `-v2-`/`-v3-` marker is read as plain JSON by the indexer.
//!
//! ## Incremental import
//!
//! Files that already exist are never overwritten, so importing a newer export on top of
//! an older one only adds the new conversations. Changed conversations keep their old copy.
//!
//! ## Usage
//!
//! ```sh
//! chatgpt-export-import ~/Downloads/chatgpt-export/conversations.json
//! chatgpt-export-import conversations.json --output-dir ~/custom/path
//! chatgpt-export-import conversations.json --json
//! ```
//!
//! The default output directory can be set as `output_dir` in
//! `~/.config/chatgpt-export-import/config.toml`.

pub mod error;
pub mod splitter;
pub mod utils;
