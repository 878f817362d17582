//! Read accounts from disk and render people as JSON.

use crate::error::MergeError;
use crate::model::{Account, Person};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Default input file, relative to the working directory.
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.json";

/// Load a JSON list of accounts from `path`.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>, MergeError> {
    let json = fs::read_to_string(path).map_err(MergeError::Read)?;
    parse_accounts(&json)
}

/// Parse a JSON list of accounts. Every field is required.
pub fn parse_accounts(json: &str) -> Result<Vec<Account>, MergeError> {
    serde_json::from_str(json).map_err(MergeError::Decode)
}

/// Render people as a JSON list indented with `indent`.
///
/// An empty `indent` produces compact single-line output.
pub fn render_people(people: &[Person], indent: &str) -> Result<String, MergeError> {
    if indent.is_empty() {
        return serde_json::to_string(people).map_err(MergeError::Encode);
    }

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    people.serialize(&mut ser).map_err(MergeError::Encode)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the rendered people plus a trailing newline.
pub fn write_people<W: Write>(
    mut writer: W,
    people: &[Person],
    indent: &str,
) -> Result<(), MergeError> {
    let rendered = render_people(people, indent)?;
    writeln!(writer, "{}", rendered).map_err(MergeError::Write)?;
    writer.flush().map_err(MergeError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(apps: &[&str], emails: &[&str], name: &str) -> Person {
        Person {
            applications: apps.iter().map(|s| s.to_string()).collect(),
            emails: emails.iter().map(|s| s.to_string()).collect(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_accounts_list() {
        let json = r#"[
            {"application": "1", "emails": ["a@gmail.com"], "name": "A"},
            {"application": "2", "emails": [], "name": "B"}
        ]"#;
        let accounts = parse_accounts(json).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].emails, vec!["a@gmail.com"]);
        assert!(accounts[1].emails.is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse_accounts(r#"{"application": "1"}"#).unwrap_err();
        assert!(matches!(err, MergeError::Decode(_)));
        assert!(err.to_string().starts_with("failed to unmarshal accounts"));

        let err = parse_accounts(r#"[{"application": "1", "emails": "a", "name": "A"}]"#)
            .unwrap_err();
        assert!(matches!(err, MergeError::Decode(_)));
    }

    #[test]
    fn test_render_with_tab_indent() {
        let rendered = render_people(&[person(&["x"], &["a"], "A")], "\t").unwrap();
        let expected = "[\n\t{\n\t\t\"applications\": [\n\t\t\t\"x\"\n\t\t],\n\t\t\"emails\": [\n\t\t\t\"a\"\n\t\t],\n\t\t\"name\": \"A\"\n\t}\n]";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_compact_and_empty() {
        assert_eq!(render_people(&[], "\t").unwrap(), "[]");
        let rendered = render_people(&[person(&["x"], &[], "A")], "").unwrap();
        assert_eq!(rendered, r#"[{"applications":["x"],"emails":[],"name":"A"}]"#);
    }

    #[test]
    fn test_write_people_appends_newline() {
        let mut out = Vec::new();
        write_people(&mut out, &[person(&["x"], &["a"], "A")], "").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}]\n"));
    }
}
