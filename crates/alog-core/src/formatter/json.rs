//! Structured (newline-delimited JSON) formatter.

use super::LogFormatter;
use crate::entry::LogEntry;
use serde_json::Value;

/// Emits exactly one JSON object per entry. Keys come out sorted; the fixed
/// fields overwrite any map key of the same name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl LogFormatter for JsonFormatter {
    fn format_entry(&self, entry: &LogEntry) -> Vec<String> {
        let mut object = entry.map_data.clone();

        object.insert("channel".into(), Value::from(entry.channel.as_str()));
        object.insert("level_str".into(), Value::from(entry.level.as_str()));
        object.insert("timestamp".into(), Value::from(entry.timestamp.as_str()));
        object.insert("num_indent".into(), Value::from(entry.num_indent));

        if !entry.message.is_empty() {
            object.insert("message".into(), Value::from(entry.message.as_str()));
        }
        if entry.log_thread_id {
            object.insert("thread_id".into(), Value::from(entry.thread_id_string()));
        }
        if let Some(service) = &entry.service_name {
            object.insert("service_name".into(), Value::from(service.as_str()));
        }

        vec![format!("{}\n", Value::Object(object))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use serde_json::json;

    fn entry(message: &str) -> LogEntry {
        let mut entry = LogEntry::new("APP", Level::Warning, message);
        entry.timestamp = "2024/01/02 03:04:05".to_string();
        entry
    }

    #[test]
    fn test_exact_line() {
        let mut e = entry("x");
        e.map_data.insert("k".into(), json!(1));

        let lines = JsonFormatter.format_entry(&e);
        assert_eq!(
            lines,
            vec![
                "{\"channel\":\"APP\",\"k\":1,\"level_str\":\"warning\",\"message\":\"x\",\
                 \"num_indent\":0,\"timestamp\":\"2024/01/02 03:04:05\"}\n"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_single_unit_even_for_multiline() {
        let lines = JsonFormatter.format_entry(&entry("a\nb"));
        assert_eq!(lines.len(), 1);
        let parsed: Value = serde_json::from_str(lines[0].trim_end()).unwrap();
        assert_eq!(parsed["message"], "a\nb");
    }

    #[test]
    fn test_optional_fields() {
        let mut e = entry("");
        let parsed: Value = serde_json::from_str(&JsonFormatter.format_entry(&e)[0]).unwrap();
        assert!(parsed.get("message").is_none());
        assert!(parsed.get("thread_id").is_none());
        assert!(parsed.get("service_name").is_none());

        e.log_thread_id = true;
        e.service_name = Some("svc".into());
        e.num_indent = 3;
        let parsed: Value = serde_json::from_str(&JsonFormatter.format_entry(&e)[0]).unwrap();
        assert_eq!(parsed["thread_id"], Value::from(e.thread_id_string()));
        assert_eq!(parsed["service_name"], "svc");
        assert_eq!(parsed["num_indent"], 3);
    }

    #[test]
    fn test_fixed_fields_win_over_map() {
        let mut e = entry("real");
        e.map_data.insert("channel".into(), json!("fake"));
        e.map_data.insert("nested".into(), json!({"a": [1, 2]}));

        let parsed: Value = serde_json::from_str(&JsonFormatter.format_entry(&e)[0]).unwrap();
        assert_eq!(parsed["channel"], "APP");
        assert_eq!(parsed["nested"]["a"][1], 2);
    }
}
