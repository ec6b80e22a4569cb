//! Typed glossary documents
//!
//! Glossaries are authored as two YAML documents per workspace root:
//!
//! ```yaml
//! # .jargon.yml
//! billing:
//!   invoice:
//!     aka: [bill, statement]
//!     description: A request for payment.
//!   dunning:
//!     aka: reminder
//! ```
//!
//! ```yaml
//! # .jargon.known.yml
//! billing:
//!   - dunning
//! ```
//!
//! Both are parsed once here into ordered, strongly-typed structures. Shapes
//! that do not fit are normalized (an `aka` string becomes a one-element list,
//! anything else becomes empty) instead of being rejected, so one sloppy entry
//! never takes the whole glossary down.

use crate::error::{JargonError, Result};
use serde_yaml::{Mapping, Value};
use tracing::warn;

/// One authored term with its aliases
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TermDefinition {
    pub name: String,
    pub aka: Vec<String>,
    pub description: Option<String>,
}

impl TermDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_aka<I, S>(mut self, aka: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aka = aka.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Terms declared under one namespace key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDefinition {
    pub name: String,
    pub terms: Vec<TermDefinition>,
}

/// Parsed `.jargon.yml`, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefinitionDocument {
    pub namespaces: Vec<NamespaceDefinition>,
}

impl DefinitionDocument {
    /// Parse a definitions document
    pub fn parse(source: &str) -> Result<Self> {
        let root = match top_level_mapping(source)? {
            Some(root) => root,
            None => return Ok(Self::default()),
        };

        let mut namespaces = Vec::with_capacity(root.len());
        for (key, value) in root {
            let Some(ns_name) = scalar_key(&key) else {
                warn!("Skipping namespace with non-scalar key: {:?}", key);
                continue;
            };

            let terms = match value {
                Value::Mapping(terms) => parse_terms(&ns_name, terms),
                Value::Null => Vec::new(),
                other => {
                    warn!(
                        "Skipping namespace '{}': expected a mapping of terms, found {}",
                        ns_name,
                        value_kind(&other)
                    );
                    continue;
                }
            };

            namespaces.push(NamespaceDefinition {
                name: ns_name,
                terms,
            });
        }

        Ok(Self { namespaces })
    }

    /// Total number of authored terms across namespaces
    pub fn term_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.terms.len()).sum()
    }
}

fn parse_terms(ns_name: &str, terms: Mapping) -> Vec<TermDefinition> {
    let mut parsed = Vec::with_capacity(terms.len());

    for (key, value) in terms {
        let Some(name) = scalar_key(&key) else {
            warn!("Skipping term with non-scalar key in namespace '{}'", ns_name);
            continue;
        };

        let (aka, description) = match value {
            Value::Mapping(fields) => (
                normalize_aka(&name, fields.get("aka")),
                fields.get("description").and_then(scalar_text),
            ),
            _ => (Vec::new(), None),
        };

        parsed.push(TermDefinition {
            name,
            aka,
            description,
        });
    }

    parsed
}

/// `aka: x` and `aka: [x, y]` are accepted; anything else means no aliases
fn normalize_aka(term: &str, aka: Option<&Value>) -> Vec<String> {
    match aka {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(alias)) => vec![alias.clone()],
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(alias) => Some(alias.clone()),
                other => {
                    warn!("Ignoring non-string alias of '{}': {:?}", term, other);
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!(
                "Ignoring aka of '{}': expected string or list, found {}",
                term,
                value_kind(other)
            );
            Vec::new()
        }
    }
}

/// Parsed `.jargon.known.yml`, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KnownTermsDocument {
    pub namespaces: Vec<(String, Vec<String>)>,
}

impl KnownTermsDocument {
    /// Parse a known-terms document
    pub fn parse(source: &str) -> Result<Self> {
        let root = match top_level_mapping(source)? {
            Some(root) => root,
            None => return Ok(Self::default()),
        };

        let mut namespaces: Vec<(String, Vec<String>)> = Vec::with_capacity(root.len());
        for (key, value) in root {
            let Some(ns_name) = scalar_key(&key) else {
                warn!("Skipping known terms with non-scalar namespace key");
                continue;
            };

            let terms = match value {
                Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
                Value::String(term) => vec![term],
                Value::Null => Vec::new(),
                other => {
                    warn!(
                        "Skipping known terms of '{}': expected a list, found {}",
                        ns_name,
                        value_kind(&other)
                    );
                    continue;
                }
            };

            namespaces.push((ns_name, terms));
        }

        Ok(Self { namespaces })
    }

    /// Record `term` as known in `namespace`
    ///
    /// Returns false when it was already listed.
    pub fn insert(&mut self, namespace: &str, term: &str) -> bool {
        match self.namespaces.iter_mut().find(|(name, _)| name == namespace) {
            Some((_, terms)) if terms.iter().any(|t| t == term) => false,
            Some((_, terms)) => {
                terms.push(term.to_string());
                true
            }
            None => {
                self.namespaces
                    .push((namespace.to_string(), vec![term.to_string()]));
                true
            }
        }
    }

    /// Known terms listed for `namespace`
    pub fn terms(&self, namespace: &str) -> &[String] {
        self.namespaces
            .iter()
            .find(|(name, _)| name == namespace)
            .map(|(_, terms)| terms.as_slice())
            .unwrap_or(&[])
    }

    /// Serialize back to YAML, keeping namespace order
    pub fn to_yaml(&self) -> Result<String> {
        let mut root = Mapping::new();
        for (namespace, terms) in &self.namespaces {
            let terms = terms.iter().cloned().map(Value::String).collect();
            root.insert(Value::String(namespace.clone()), Value::Sequence(terms));
        }
        Ok(serde_yaml::to_string(&Value::Mapping(root))?)
    }
}

/// Parse `source` and require a mapping at the top; blank documents yield None
fn top_level_mapping(source: &str) -> Result<Option<Mapping>> {
    if source.trim().is_empty() {
        return Ok(None);
    }

    match serde_yaml::from_str::<Value>(source)? {
        Value::Mapping(root) => Ok(Some(root)),
        Value::Null => Ok(None),
        other => Err(JargonError::InvalidDefinition(format!(
            "expected a mapping of namespaces at the top level, found {}",
            value_kind(&other)
        ))),
    }
}

/// Keys are usually strings, but YAML happily produces `2024:` or `true:`
fn scalar_key(key: &Value) -> Option<String> {
    scalar_text(key)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_shapes() {
        let doc = DefinitionDocument::parse(
            r#"
billing:
  invoice:
    aka: [bill, statement]
    description: A request for payment.
  dunning:
    aka: reminder
shipping:
  manifest:
    description: List of parcels.
"#,
        )
        .unwrap();

        assert_eq!(doc.namespaces.len(), 2);
        assert_eq!(doc.namespaces[0].name, "billing");
        assert_eq!(doc.namespaces[1].name, "shipping");
        assert_eq!(doc.term_count(), 3);

        let invoice = &doc.namespaces[0].terms[0];
        assert_eq!(invoice.name, "invoice");
        assert_eq!(invoice.aka, vec!["bill", "statement"]);
        assert_eq!(invoice.description.as_deref(), Some("A request for payment."));

        let dunning = &doc.namespaces[0].terms[1];
        assert_eq!(dunning.aka, vec!["reminder"]);
        assert_eq!(dunning.description, None);
    }

    #[test]
    fn test_malformed_aka_is_normalized_to_empty() {
        let doc = DefinitionDocument::parse(
            r#"
global:
  widget:
    aka:
      nested: mapping
  gadget:
    aka: 42
  doohickey:
"#,
        )
        .unwrap();

        let terms = &doc.namespaces[0].terms;
        assert!(terms.iter().all(|t| t.aka.is_empty()));
        assert_eq!(terms[2].name, "doohickey");
    }

    #[test]
    fn test_non_string_aliases_are_dropped() {
        let doc = DefinitionDocument::parse("global:\n  api:\n    aka: [endpoint, 3, ~]\n").unwrap();
        assert_eq!(doc.namespaces[0].terms[0].aka, vec!["endpoint"]);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(DefinitionDocument::parse("").unwrap(), DefinitionDocument::default());
        assert_eq!(DefinitionDocument::parse("~\n").unwrap(), DefinitionDocument::default());
    }

    #[test]
    fn test_top_level_list_is_rejected() {
        let err = DefinitionDocument::parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, JargonError::InvalidDefinition(_)));
    }

    #[test]
    fn test_namespace_with_scalar_value_is_skipped() {
        let doc = DefinitionDocument::parse("broken: 1\nok:\n  term: {}\n").unwrap();
        assert_eq!(doc.namespaces.len(), 1);
        assert_eq!(doc.namespaces[0].name, "ok");
    }

    #[test]
    fn test_known_terms_parse_and_insert() {
        let mut known = KnownTermsDocument::parse("billing:\n  - invoice\nauth: token\n").unwrap();
        assert_eq!(known.terms("billing"), ["invoice".to_string()]);
        assert_eq!(known.terms("auth"), ["token".to_string()]);
        assert!(known.terms("missing").is_empty());

        assert!(!known.insert("billing", "invoice"));
        assert!(known.insert("billing", "dunning"));
        assert!(known.insert("shipping", "manifest"));
        assert_eq!(known.terms("billing").len(), 2);
        assert_eq!(known.namespaces.last().unwrap().0, "shipping");
    }

    #[test]
    fn test_known_terms_yaml_output_reparses() {
        let mut known = KnownTermsDocument::default();
        known.insert("billing", "invoice");
        known.insert("auth", "token");

        let yaml = known.to_yaml().unwrap();
        assert!(yaml.find("billing").unwrap() < yaml.find("auth").unwrap());
        assert_eq!(KnownTermsDocument::parse(&yaml).unwrap(), known);
    }
}
