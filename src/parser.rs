//! Schema document parsing
//!
//! Given one canonical location, fetch the document and extract the pair
//! of values the walk needs: the root element's target namespace and the
//! list of direct `xs:import` children. Nothing else in the document is
//! inspected.

use crate::error::{ParseFailure, Result};
use crate::loaders::Loader;
use crate::locations::Location;
use crate::XSD_NAMESPACE;

/// One import declaration extracted from a schema document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Namespace asserted by the declaration
    pub namespace: String,
    /// Reference string (the `schemaLocation` attribute), not yet resolved
    pub schema_location: String,
}

/// Parse result for one schema document
#[derive(Debug, Clone, Default)]
pub struct SchemaInfo {
    /// Target namespace of the document; empty when the root element
    /// carries no `targetNamespace` attribute
    pub target_namespace: String,
    /// Import declarations in document order
    pub imports: Vec<ImportInfo>,
}

/// Parser for schema documents
#[derive(Debug, Default)]
pub struct SchemaParser {
    loader: Loader,
}

impl SchemaParser {
    /// Create a parser with a default loader
    pub fn new() -> Self {
        Self {
            loader: Loader::new(),
        }
    }

    /// Create a parser with a custom loader
    pub fn with_loader(loader: Loader) -> Self {
        Self { loader }
    }

    /// Fetch and parse the document at `location`
    ///
    /// Any failure here (unreadable resource, malformed XML) is reported
    /// as a [`ParseFailure`] carrying the location; the walk treats it as
    /// non-fatal.
    pub fn parse(&self, location: &Location) -> std::result::Result<SchemaInfo, ParseFailure> {
        let text = self
            .loader
            .load(location)
            .map_err(|e| ParseFailure::new(location.as_str(), e.to_string()))?;
        parse_schema(&text).map_err(|e| ParseFailure::new(location.as_str(), e.to_string()))
    }
}

/// Parse schema text already in memory
///
/// A missing `targetNamespace` attribute yields the empty string. An
/// import lacking either attribute is skipped; imports with a namespace
/// but no `schemaLocation` are seen in practice and are not resolvable.
pub fn parse_schema(text: &str) -> Result<SchemaInfo> {
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| crate::error::Error::Xml(e.to_string()))?;
    let root = doc.root_element();

    let target_namespace = root.attribute("targetNamespace").unwrap_or("").to_string();

    let mut imports = Vec::new();
    for child in root.children().filter(|n| n.is_element()) {
        let name = child.tag_name();
        if name.name() != "import" || name.namespace() != Some(XSD_NAMESPACE) {
            continue;
        }
        match (child.attribute("namespace"), child.attribute("schemaLocation")) {
            (Some(namespace), Some(schema_location)) => imports.push(ImportInfo {
                namespace: namespace.to_string(),
                schema_location: schema_location.to_string(),
            }),
            _ => {
                tracing::debug!("skipping import with missing namespace or schemaLocation");
            }
        }
    }

    Ok(SchemaInfo {
        target_namespace,
        imports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_target_namespace_and_imports() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                                targetNamespace="urn:n1">
            <xs:import namespace="urn:n2" schemaLocation="b.xsd"/>
            <xs:import namespace="urn:n3" schemaLocation="http://h/c.xsd"/>
        </xs:schema>"#;
        let info = parse_schema(xml).unwrap();
        assert_eq!(info.target_namespace, "urn:n1");
        assert_eq!(
            info.imports,
            vec![
                ImportInfo {
                    namespace: "urn:n2".to_string(),
                    schema_location: "b.xsd".to_string()
                },
                ImportInfo {
                    namespace: "urn:n3".to_string(),
                    schema_location: "http://h/c.xsd".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_absent_target_namespace_is_empty() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#;
        let info = parse_schema(xml).unwrap();
        assert_eq!(info.target_namespace, "");
        assert!(info.imports.is_empty());
    }

    #[test]
    fn test_import_without_schema_location_skipped() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                                targetNamespace="urn:n1">
            <xs:import namespace="urn:n2"/>
            <xs:import namespace="urn:n3" schemaLocation="c.xsd"/>
        </xs:schema>"#;
        let info = parse_schema(xml).unwrap();
        assert_eq!(info.imports.len(), 1);
        assert_eq!(info.imports[0].namespace, "urn:n3");
    }

    #[test]
    fn test_import_without_namespace_skipped() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:import schemaLocation="c.xsd"/>
        </xs:schema>"#;
        let info = parse_schema(xml).unwrap();
        assert!(info.imports.is_empty());
    }

    #[test]
    fn test_other_prefix_for_xsd_namespace() {
        let xml = r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                                 targetNamespace="urn:n1">
            <xsd:import namespace="urn:n2" schemaLocation="b.xsd"/>
        </xsd:schema>"#;
        let info = parse_schema(xml).unwrap();
        assert_eq!(info.imports.len(), 1);
    }

    #[test]
    fn test_non_xsd_import_elements_ignored() {
        let xml = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                                xmlns:o="urn:other" targetNamespace="urn:n1">
            <o:import namespace="urn:n2" schemaLocation="b.xsd"/>
        </xs:schema>"#;
        let info = parse_schema(xml).unwrap();
        assert!(info.imports.is_empty());
    }

    #[test]
    fn test_malformed_xml_fails() {
        assert!(parse_schema("<xs:schema").is_err());
    }

    #[test]
    fn test_parse_failure_carries_location() {
        let parser = SchemaParser::new();
        let location = Location::parse("file:///no/such/schema.xsd").unwrap();
        let err = parser.parse(&location).unwrap_err();
        assert_eq!(err.location, "file:///no/such/schema.xsd");
    }
}
