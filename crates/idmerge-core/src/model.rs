//! Account and person records.

use serde::{Deserialize, Serialize};

/// One source record tied to a single originating application.
///
/// `emails` is treated as a set by the merger; duplicates are allowed in input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub application: String,
    pub emails: Vec<String>,
    pub name: String,
}

/// A merged identity: one or more accounts that share contact addresses.
///
/// `applications` and `emails` hold no repeated values and are emitted in
/// lexicographic order, but callers should still compare them as sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub applications: Vec<String>,
    pub emails: Vec<String>,
    /// Name of the representative account, never concatenated.
    pub name: String,
}

impl Account {
    pub fn new(
        application: impl Into<String>,
        emails: impl IntoIterator<Item = impl Into<String>>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            application: application.into(),
            emails: emails.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }
}

impl Person {
    /// Whether this person holds the given contact address.
    pub fn has_email(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_requires_all_fields() {
        let missing_name = r#"{"application": "x", "emails": ["a"]}"#;
        assert!(serde_json::from_str::<Account>(missing_name).is_err());

        let full = r#"{"application": "x", "emails": ["a", "a"], "name": "A"}"#;
        let account: Account = serde_json::from_str(full).unwrap();
        assert_eq!(account, Account::new("x", ["a", "a"], "A"));
    }

    #[test]
    fn test_person_field_order() {
        let person = Person {
            applications: vec!["x".to_string()],
            emails: vec!["a".to_string()],
            name: "A".to_string(),
        };
        let json = serde_json::to_string(&person).unwrap();
        assert_eq!(json, r#"{"applications":["x"],"emails":["a"],"name":"A"}"#);
    }

    #[test]
    fn test_has_email() {
        let person = Person {
            applications: vec!["x".to_string()],
            emails: vec!["a".to_string(), "c".to_string()],
            name: "A".to_string(),
        };
        assert!(person.has_email("c"));
        assert!(!person.has_email("b"));
    }
}
