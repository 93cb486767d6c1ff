//! Uber schema synthesis
//!
//! Serializes a pruned leaf set as one minimal schema document whose body
//! is nothing but import statements — a single entry point for downstream
//! compilation tooling (e.g. a binding compiler) that wants one schema
//! rather than a scattered set.

use crate::error::{Error, Result};
use crate::graph::Node;
use crate::XSD_NAMESPACE;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// Render the import elements for `nodes`, sorted by canonical location
///
/// One self-closing import element per node, namespace from the node's
/// target namespace and `schemaLocation` from its canonical location.
/// Also used verbatim in the text report.
pub fn as_import_list(nodes: &[&Node], prefix: &str) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_imports(&mut writer, nodes, prefix)?;
    into_string(writer)
}

/// Synthesize the uber schema document
///
/// The root element binds `prefix` to the XSD namespace, declares a target
/// namespace derived from `output_name`, and qualifies elements but not
/// attributes. Import order is stable (sorted by canonical location) so
/// repeated synthesis over the same set is byte-identical.
pub fn synthesize_uber_schema(
    pruned_leaves: &[&Node],
    output_name: &str,
    prefix: &str,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let schema_tag = format!("{}:schema", prefix);
    let xmlns_attr = format!("xmlns:{}", prefix);
    let mut root = BytesStart::new(schema_tag.as_str());
    root.push_attribute((xmlns_attr.as_str(), XSD_NAMESPACE));
    root.push_attribute(("targetNamespace", output_name));
    root.push_attribute(("elementFormDefault", "qualified"));
    root.push_attribute(("attributeFormDefault", "unqualified"));
    root.push_attribute(("version", "2.0"));
    writer
        .write_event(Event::Start(root))
        .map_err(|e| Error::Xml(e.to_string()))?;

    write_imports(&mut writer, pruned_leaves, prefix)?;

    writer
        .write_event(Event::End(BytesEnd::new(schema_tag.as_str())))
        .map_err(|e| Error::Xml(e.to_string()))?;

    let mut text = into_string(writer)?;
    text.push('\n');
    Ok(text)
}

fn write_imports(writer: &mut Writer<Vec<u8>>, nodes: &[&Node], prefix: &str) -> Result<()> {
    let mut sorted: Vec<&&Node> = nodes.iter().collect();
    sorted.sort_by(|a, b| a.location().cmp(b.location()));

    let import_tag = format!("{}:import", prefix);
    for node in sorted {
        let mut import = BytesStart::new(import_tag.as_str());
        import.push_attribute(("namespace", node.target_namespace()));
        import.push_attribute(("schemaLocation", node.location().as_str()));
        writer
            .write_event(Event::Empty(import))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }
    Ok(())
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::Location;
    use pretty_assertions::assert_eq;

    fn node(location: &str, tns: &str) -> Node {
        Node::new(Location::parse(location).unwrap(), tns)
    }

    #[test]
    fn test_uber_schema_shape() {
        let a = node("file:///a.xsd", "urn:a");
        let b = node("http://h/b.xsd", "urn:b");
        let text = synthesize_uber_schema(&[&a, &b], "out.uber.xsd", "xs").unwrap();

        // round-trips as XML with the expected root
        let doc = roxmltree::Document::parse(&text).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "schema");
        assert_eq!(root.tag_name().namespace(), Some(XSD_NAMESPACE));
        assert_eq!(root.attribute("targetNamespace"), Some("out.uber.xsd"));
        assert_eq!(root.attribute("elementFormDefault"), Some("qualified"));
        assert_eq!(root.attribute("attributeFormDefault"), Some("unqualified"));

        let imports: Vec<_> = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "import")
            .collect();
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].attribute("schemaLocation"), Some("file:///a.xsd"));
        assert_eq!(imports[0].attribute("namespace"), Some("urn:a"));
        assert_eq!(imports[1].attribute("schemaLocation"), Some("http://h/b.xsd"));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let a = node("file:///a.xsd", "urn:a");
        let b = node("file:///b.xsd", "urn:b");
        let c = node("http://h/c.xsd", "urn:c");
        let once = synthesize_uber_schema(&[&c, &a, &b], "x", "xs").unwrap();
        let twice = synthesize_uber_schema(&[&b, &c, &a], "x", "xs").unwrap();
        assert_eq!(once, twice);

        // sorted by canonical location, file: before http:
        let a_at = once.find("file:///a.xsd").unwrap();
        let b_at = once.find("file:///b.xsd").unwrap();
        let c_at = once.find("http://h/c.xsd").unwrap();
        assert!(a_at < b_at && b_at < c_at);
    }

    #[test]
    fn test_attribute_values_escaped() {
        let n = node("file:///a.xsd", "urn:a&b\"c");
        let text = as_import_list(&[&n], "xs").unwrap();
        assert!(text.contains("urn:a&amp;b"));
        let wrapped = format!(
            "<xs:schema xmlns:xs=\"{}\">{}</xs:schema>",
            XSD_NAMESPACE, text
        );
        assert!(roxmltree::Document::parse(&wrapped).is_ok());
    }

    #[test]
    fn test_empty_pruned_set_yields_bodyless_schema() {
        let text = synthesize_uber_schema(&[], "empty", "xs").unwrap();
        let doc = roxmltree::Document::parse(&text).unwrap();
        assert_eq!(doc.root_element().children().filter(|n| n.is_element()).count(), 0);
    }
}
