//! Shared XML reading built on `quick_xml`'s pull parser. Used by the
//! XML/configuration symbol extractor here and, as a public dependency,
//! by the manifest reader in the dependency-resolution stage — both
//! need the same "give me a simple element tree" shape, not streaming
//! event handling of their own.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Parses the whole document into an in-memory element tree. Malformed
/// XML is reported rather than panicking, since manifests in a legacy
/// codebase are not always well-formed.
pub fn parse(content: &str) -> Result<XmlElement, quick_xml::Error> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut root = XmlElement { name: "#document".to_string(), ..Default::default() };
    let mut stack: Vec<XmlElement> = vec![root.clone()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let mut attributes = HashMap::new();
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
                    let value = attr.unescape_value().unwrap_or_default().to_string();
                    attributes.insert(key, value);
                }
                stack.push(XmlElement { name, attributes, text: String::new(), children: Vec::new() });
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let mut attributes = HashMap::new();
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
                    let value = attr.unescape_value().unwrap_or_default().to_string();
                    attributes.insert(key, value);
                }
                let leaf = XmlElement { name, attributes, text: String::new(), children: Vec::new() };
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(leaf);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() > 1 {
                    let finished = stack.pop().unwrap();
                    stack.last_mut().unwrap().children.push(finished);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    root = stack.pop().unwrap_or(root);
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc = r#"<Project Sdk="Microsoft.NET.Sdk"><ItemGroup><PackageReference Include="Newtonsoft.Json" Version="13.0.1" /></ItemGroup></Project>"#;
        let root = parse(doc).unwrap();
        let project = root.child("Project").unwrap();
        assert_eq!(project.attributes.get("Sdk").unwrap(), "Microsoft.NET.Sdk");
        let item_group = project.child("ItemGroup").unwrap();
        let package_ref = item_group.child("PackageReference").unwrap();
        assert_eq!(package_ref.attributes.get("Include").unwrap(), "Newtonsoft.Json");
    }
}
