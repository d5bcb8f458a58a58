//! The mutation driver: everything the CLI asked to change, applied to a
//! loaded document in a fixed order.

use crate::coerce::coerce;
use crate::document::ConfigDocument;
use serde_json::Value;

/// One `NAME=VALUE` token from `--parameter`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Value,
}

impl Assignment {
    /// Parse a `NAME=VALUE` token. Exactly one `=` separator is required
    /// and the name must be non-empty; the value goes through lenient
    /// coercion. Used as the clap value parser, so a malformed token is a
    /// fatal argument error before any mutation runs.
    pub fn parse(token: &str) -> Result<Self, String> {
        let parts: Vec<&str> = token.split('=').collect();
        let [name, value] = parts.as_slice() else {
            return Err(format!(
                "--parameter has <name>=<value> syntax, got '{token}'"
            ));
        };
        if name.is_empty() {
            return Err("parameter name can't be empty".to_string());
        }
        Ok(Self {
            name: name.to_string(),
            value: coerce(value),
        })
    }
}

/// All mutations requested by one invocation. Field order below is the
/// application order; bulk assignments always run first, the deletion last.
#[derive(Debug, Clone, Default)]
pub struct MutationSet {
    pub assignments: Vec<Assignment>,
    pub bootstrap_token: Option<String>,
    pub disable_cert_check: Option<bool>,
    pub fingerprint: Option<String>,
    pub folders_storage_path: Option<String>,
    pub host: Option<String>,
    pub tags: Option<String>,
    pub use_gui: Option<bool>,
    pub delete: Option<String>,
}

impl MutationSet {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
            && self.bootstrap_token.is_none()
            && self.disable_cert_check.is_none()
            && self.fingerprint.is_none()
            && self.folders_storage_path.is_none()
            && self.host.is_none()
            && self.tags.is_none()
            && self.use_gui.is_none()
            && self.delete.is_none()
    }

    /// Apply every requested mutation. Returns whether the document needs
    /// to be rewritten; a deletion that found nothing to remove does not
    /// count on its own.
    pub fn apply(&self, doc: &mut ConfigDocument) -> bool {
        let mut changed = false;

        for assignment in &self.assignments {
            doc.set(&assignment.name, assignment.value.clone());
            changed = true;
        }

        if let Some(token) = &self.bootstrap_token {
            doc.set("bootstrap_token", coerce(token));
            changed = true;
        }
        if let Some(disable) = self.disable_cert_check {
            doc.set("disable_cert_check", Value::Bool(disable));
            changed = true;
        }
        if let Some(fingerprint) = &self.fingerprint {
            doc.set("cert_authority_fingerprint", coerce(fingerprint));
            changed = true;
        }
        if let Some(path) = &self.folders_storage_path {
            doc.set("folders_storage_path", coerce(path));
            changed = true;
        }
        if let Some(host) = &self.host {
            doc.set("host", coerce(host));
            changed = true;
        }
        if let Some(tags) = &self.tags {
            doc.set("tags", coerce(tags));
            changed = true;
        }
        if let Some(use_gui) = self.use_gui {
            doc.set("use_gui", Value::Bool(use_gui));
            changed = true;
        }

        if let Some(name) = &self.delete {
            changed |= doc.delete(name);
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_assignment_coerces_value() {
        let a = Assignment::parse("use_gui=True").unwrap();
        assert_eq!(a.name, "use_gui");
        assert_eq!(a.value, json!(true));

        let a = Assignment::parse("folders_storage_path=D:\\Downloads").unwrap();
        assert_eq!(a.value, json!("D:\\Downloads"));

        let a = Assignment::parse("max_file_size=1024").unwrap();
        assert_eq!(a.value, json!(1024));
    }

    #[test]
    fn parse_assignment_allows_empty_value() {
        let a = Assignment::parse("tags=").unwrap();
        assert_eq!(a.value, json!(""));
    }

    #[test]
    fn parse_assignment_rejects_malformed_tokens() {
        assert!(Assignment::parse("foo").is_err());
        assert!(Assignment::parse("a=b=c").is_err());
        assert!(Assignment::parse("=value").is_err());
    }

    #[test]
    fn empty_set_applies_nothing() {
        let set = MutationSet::default();
        assert!(set.is_empty());
        let mut doc = ConfigDocument::default();
        assert!(!set.apply(&mut doc));
        assert!(doc.is_empty());
    }

    #[test]
    fn named_flags_override_bulk_assignments() {
        // Bulk assignments run first, so the named flag wins for the same key.
        let set = MutationSet {
            assignments: vec![Assignment::parse("tags=from_bulk").unwrap()],
            tags: Some("from_flag".into()),
            ..Default::default()
        };
        let mut doc = ConfigDocument::default();
        assert!(set.apply(&mut doc));
        assert_eq!(doc.get("tags"), Some(&json!("from_flag")));
    }

    #[test]
    fn fingerprint_flag_maps_to_cert_authority_fingerprint() {
        let set = MutationSet {
            fingerprint: Some("abc123".into()),
            ..Default::default()
        };
        let mut doc = ConfigDocument::default();
        assert!(set.apply(&mut doc));
        assert_eq!(
            doc.as_map().get("management_server"),
            Some(&json!({"cert_authority_fingerprint": "abc123"}))
        );
    }

    #[test]
    fn strict_bool_flags_insert_booleans_directly() {
        let set = MutationSet {
            disable_cert_check: Some(true),
            use_gui: Some(false),
            ..Default::default()
        };
        let mut doc = ConfigDocument::default();
        assert!(set.apply(&mut doc));
        assert_eq!(doc.get("disable_cert_check"), Some(&json!(true)));
        assert_eq!(doc.as_map().get("use_gui"), Some(&json!(false)));
    }

    #[test]
    fn delete_of_absent_key_alone_reports_no_change() {
        let set = MutationSet {
            delete: Some("no_such_key".into()),
            ..Default::default()
        };
        let mut doc = ConfigDocument::default();
        assert!(!set.apply(&mut doc));
    }

    #[test]
    fn delete_runs_after_assignments() {
        let set = MutationSet {
            assignments: vec![Assignment::parse("scratch=1").unwrap()],
            delete: Some("scratch".into()),
            ..Default::default()
        };
        let mut doc = ConfigDocument::default();
        assert!(set.apply(&mut doc));
        assert!(doc.get("scratch").is_none());
    }
}
