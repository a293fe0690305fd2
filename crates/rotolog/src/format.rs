//! Format-specific record serialization.
//!
//! [`serialize`] is a pure function of (message, level, timestamp); it never
//! touches the filesystem. Escaping is format-specific: JSON goes through
//! `serde_json` (standard escapes plus `\uXXXX` for control characters), CSV
//! quote-wraps the message and doubles inner quotes, XML entity-escapes all
//! fields.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{LogFormat, LogLevel};

/// Timestamp layout used in every record: local wall clock, second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The JSON object written as one array element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRecord {
    /// Record creation time, formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Severity display string ("Info", "Warning", ...).
    pub log_type: String,
    /// The caller's message, unmodified.
    pub message: String,
}

/// Serializes one record into its on-disk representation.
///
/// The returned string carries no trailing newline and, for JSON, no
/// surrounding array punctuation; the writer owns record separation.
///
/// # Errors
///
/// Returns an error only for JSON, if `serde_json` fails to serialize the
/// record (which cannot happen for plain string fields in practice).
pub fn serialize(
    format: LogFormat,
    message: &str,
    level: LogLevel,
    timestamp: &str,
) -> Result<String> {
    match format {
        LogFormat::Txt => Ok(txt_line(message, level, timestamp)),
        LogFormat::Csv => Ok(format!(
            "{timestamp},{level},\"{}\"",
            message.replace('"', "\"\"")
        )),
        LogFormat::Json => {
            let record = JsonRecord {
                timestamp: timestamp.to_string(),
                log_type: level.as_str().to_string(),
                message: message.to_string(),
            };
            // Pretty-print with the default two-space indent, then shift the
            // whole object two spaces right so it nests inside the array.
            let pretty = serde_json::to_string_pretty(&record)?;
            Ok(indent_block(&pretty))
        }
        LogFormat::Xml => Ok(format!(
            "<log><timestamp>{}</timestamp><type>{}</type><message>{}</message></log>",
            xml_escape(timestamp),
            level.as_str(),
            xml_escape(message)
        )),
    }
}

/// The human-readable line used for TXT files and the debug echo sink.
#[must_use]
pub fn txt_line(message: &str, level: LogLevel, timestamp: &str) -> String {
    format!("[{timestamp}] [{level}] {message}")
}

fn indent_block(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.lines().count() * 2);
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("  ");
        out.push_str(line);
    }
    out
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn txt_record_layout() {
        let line = serialize(LogFormat::Txt, "service started", LogLevel::Info, "2024-05-01 14:30:00")
            .expect("serialize");
        assert_eq!(line, "[2024-05-01 14:30:00] [Info] service started");
    }

    #[test]
    fn csv_record_quote_wraps_message() {
        let line = serialize(LogFormat::Csv, "plain text", LogLevel::Warning, "2024-05-01 14:30:00")
            .expect("serialize");
        assert_eq!(line, "2024-05-01 14:30:00,Warning,\"plain text\"");
    }

    #[test]
    fn csv_record_doubles_inner_quotes() {
        let line = serialize(LogFormat::Csv, "said \"hi\"", LogLevel::Info, "ts").expect("serialize");
        assert_eq!(line, "ts,Info,\"said \"\"hi\"\"\"");
    }

    #[test]
    fn json_record_is_pretty_and_indented() {
        let entry = serialize(LogFormat::Json, "hello", LogLevel::Debug, "2024-05-01 14:30:00")
            .expect("serialize");
        // Every line is shifted two spaces for array nesting.
        for line in entry.lines() {
            assert!(line.starts_with("  "), "line not indented: {line:?}");
        }
        assert!(entry.contains("\"log_type\": \"Debug\""));
        assert!(entry.contains("\"message\": \"hello\""));
    }

    #[test]
    fn json_record_escapes_structural_characters() {
        let entry = serialize(LogFormat::Json, "a \"b\" \\ c\nd\te\u{1}", LogLevel::Error, "ts")
            .expect("serialize");
        let parsed: JsonRecord = serde_json::from_str(entry.trim()).expect("parse");
        assert_eq!(parsed.message, "a \"b\" \\ c\nd\te\u{1}");
        assert_eq!(parsed.log_type, "Error");
    }

    #[test]
    fn xml_record_entity_escapes_message() {
        let entry = serialize(LogFormat::Xml, "a < b & c > \"d\"", LogLevel::Critical, "ts")
            .expect("serialize");
        assert_eq!(
            entry,
            "<log><timestamp>ts</timestamp><type>Critical</type>\
             <message>a &lt; b &amp; c &gt; &quot;d&quot;</message></log>"
        );
    }

    proptest! {
        // Any message survives the round trip through JSON escaping once the
        // entry is framed as an array and parsed back.
        #[test]
        fn json_message_round_trips(message in "\\PC*") {
            let entry = serialize(LogFormat::Json, &message, LogLevel::Info, "2024-05-01 14:30:00")
                .expect("serialize");
            let doc = format!("[\n{entry}\n]");
            let parsed: Vec<JsonRecord> = serde_json::from_str(&doc).expect("parse");
            prop_assert_eq!(parsed.len(), 1);
            prop_assert_eq!(&parsed[0].message, &message);
        }

        #[test]
        fn json_control_characters_round_trip(message in proptest::collection::vec(0u8..32, 0..16)) {
            let message: String = message.into_iter().map(char::from).collect();
            let entry = serialize(LogFormat::Json, &message, LogLevel::Unknown, "ts")
                .expect("serialize");
            let doc = format!("[\n{entry}\n]");
            let parsed: Vec<JsonRecord> = serde_json::from_str(&doc).expect("parse");
            prop_assert_eq!(&parsed[0].message, &message);
        }
    }
}
