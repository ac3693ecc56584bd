use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::path::PathBuf;

/// Directory created under the base output dir. The indexer treats any
/// `conversations-*` directory without a `-v2-`/`-v3-` marker as plain JSON.
pub const CONVERSATIONS_DIR: &str = "conversations-web-export";

/// Configuration required to run the import.
/// This decouples the logic from how the arguments were parsed (CLI/Config file).
#[derive(Clone, Debug)]
pub struct ImportConfig {
    pub export_path: PathBuf,
    pub output_dir: PathBuf,
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    Imported,
    Skipped,
}

/// Outcome of one import run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub success: bool,
    pub total: usize,
    pub imported: usize,
    pub skipped: usize,
    pub output_dir: PathBuf,
}

/// Where the ChatGPT desktop app keeps its data.
/// On macOS this is `~/Library/Application Support/com.openai.chat`.
pub fn default_output_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("com.openai.chat"))
}

/// The only two fields of a conversation that are ever looked at.
/// Values stay raw so numbers, objects or odd escapes there cannot fail the parse.
#[derive(Deserialize, Default)]
struct RecordIds<'a> {
    #[serde(borrow, default)]
    id: Option<&'a RawValue>,
    #[serde(borrow, default)]
    conversation_id: Option<&'a RawValue>,
}

/// Pick the file stem for a record: `id`, then `conversation_id`, then `conv-<index>`.
pub fn resolve_record_id(record: &RawValue, index: usize) -> String {
    // A derived struct would also accept a JSON array positionally.
    let ids: RecordIds = if record.get().starts_with('{') {
        serde_json::from_str(record.get()).unwrap_or_default()
    } else {
        RecordIds::default()
    };

    [ids.id, ids.conversation_id]
        .into_iter()
        .flatten()
        .filter_map(|raw| serde_json::from_str::<String>(raw.get()).ok())
        .find(|candidate| is_plain_stem(candidate))
        .unwrap_or_else(|| format!("conv-{}", index))
}

// Empty names and anything that would resolve outside the output dir are rejected.
fn is_plain_stem(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate != "."
        && candidate != ".."
        && !candidate.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serde_json::value::to_raw_value;

    fn resolve(record: serde_json::Value, index: usize) -> String {
        resolve_record_id(&to_raw_value(&record).unwrap(), index)
    }

    #[test]
    fn id_wins_over_conversation_id() {
        assert_eq!(resolve(json!({"id": "A", "conversation_id": "B"}), 0), "A");
    }

    #[test]
    fn falls_back_to_conversation_id() {
        assert_eq!(resolve(json!({"conversation_id": "y2", "title": "hello"}), 1), "y2");
    }

    #[test]
    fn empty_id_is_ignored() {
        assert_eq!(resolve(json!({"id": "", "conversation_id": "B"}), 0), "B");
    }

    #[test]
    fn positional_fallback_uses_zero_based_index() {
        assert_eq!(resolve(json!({"other": 1}), 2), "conv-2");
        assert_eq!(resolve(json!({"id": null}), 0), "conv-0");
    }

    #[test]
    fn non_string_ids_fall_through() {
        assert_eq!(resolve(json!({"id": 42, "conversation_id": ["x"]}), 7), "conv-7");
        assert_eq!(resolve(json!({"id": {"nested": "A"}, "conversation_id": "B"}), 0), "B");
    }

    #[test]
    fn non_object_records_get_positional_names() {
        assert_eq!(resolve(json!("just a string"), 3), "conv-3");
        assert_eq!(resolve(json!(["A", "B"]), 4), "conv-4");
    }

    #[test]
    fn path_like_ids_are_rejected() {
        assert_eq!(resolve(json!({"id": "../escape", "conversation_id": "safe"}), 0), "safe");
        assert_eq!(resolve(json!({"id": "..", "conversation_id": "a\\b"}), 5), "conv-5");
    }

    #[test]
    fn nul_bytes_are_rejected() {
        assert_eq!(resolve(json!({"id": "a\u{0}b", "conversation_id": "ok"}), 0), "ok");
        assert_eq!(resolve(json!({"conversation_id": "\u{0}"}), 1), "conv-1");
    }

    #[test]
    fn unreadable_id_string_falls_through() {
        let record = RawValue::from_string(r#"{"id":"\ud83d","conversation_id":"c1"}"#.to_string())
            .unwrap();
        assert_eq!(resolve_record_id(&record, 0), "c1");
    }
}
