//! Judge-style province catalogue reader.
//!
//! Reads the `<PROVINCE>` / `<UNIQUENAME>` / `<ADJACENCY>` catalogue used by
//! Judge-derived variants:
//!
//! ```text
//! <PROVINCES>
//!     <PROVINCE shortname="bul" fullname="Bulgaria">
//!         <ADJACENCY type="mv" refs="gre con ser rum" />
//!         <ADJACENCY type="ec" refs="con bla rum" />
//!         <ADJACENCY type="sc" refs="gre aeg con" />
//!     </PROVINCE>
//! </PROVINCES>
//! ```
//!
//! Element and attribute names match case-insensitively. Elements outside this
//! vocabulary are skipped wherever they appear.

use roxmltree::{Document, Node, ParsingOptions};

use super::description::{AdjacencyDecl, AdjacencyKind, MapDescription, ProvinceEntry};
use super::error::MapError;

fn syntax(line: u32, message: impl Into<String>) -> MapError {
    MapError::Syntax {
        line: line as usize,
        message: message.into(),
    }
}

fn is_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

/// A catalogue element with its source line.
struct Element<'a, 'input> {
    node: Node<'a, 'input>,
    line: u32,
}

impl<'a, 'input> Element<'a, 'input> {
    fn new(doc: &'a Document<'input>, node: Node<'a, 'input>) -> Self {
        let line = doc.text_pos_at(node.range().start).row;
        Element { node, line }
    }

    fn name(&self) -> &str {
        self.node.tag_name().name()
    }

    fn attr(&self, key: &str) -> Option<&'a str> {
        self.node
            .attributes()
            .find(|a| a.name().eq_ignore_ascii_case(key))
            .map(|a| a.value())
    }

    fn required(&self, key: &str) -> Result<&'a str, MapError> {
        self.attr(key).ok_or_else(|| {
            syntax(
                self.line,
                format!("<{}> is missing the '{}' attribute", self.name(), key),
            )
        })
    }
}

/// Parses a Judge catalogue into a map description.
pub fn parse_judge(src: &str) -> Result<MapDescription, MapError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(src, options)
        .map_err(|e| syntax(e.pos().row, e.to_string()))?;

    let mut desc = MapDescription::default();
    for node in doc.descendants().filter(|n| n.is_element()) {
        let el = Element::new(&doc, node);
        if is_element(&node, "PROVINCE") {
            if let Some(outer) = node.ancestors().skip(1).find(|a| is_element(a, "PROVINCE")) {
                return Err(syntax(
                    el.line,
                    format!(
                        "<PROVINCE> nested inside '{}'",
                        outer.attribute("shortname").unwrap_or_default()
                    ),
                ));
            }
            desc.provinces.push(read_province(&doc, &el)?);
        } else if is_element(&node, "UNIQUENAME") || is_element(&node, "ADJACENCY") {
            let inside = node.parent().is_some_and(|p| is_element(&p, "PROVINCE"));
            if !inside {
                return Err(syntax(
                    el.line,
                    format!("<{}> outside of a <PROVINCE>", el.name()),
                ));
            }
        } else {
            log::debug!("line {}: skipping <{}>", el.line, el.name());
        }
    }

    log::debug!("read {} provinces from judge catalogue", desc.provinces.len());
    Ok(desc)
}

fn read_province<'a, 'input>(
    doc: &'a Document<'input>,
    el: &Element<'a, 'input>,
) -> Result<ProvinceEntry, MapError> {
    let key = el.required("shortname")?;
    let mut entry = ProvinceEntry::new(key, el.attr("fullname").unwrap_or(key));

    for child in el.node.children().filter(|n| n.is_element()) {
        let child_el = Element::new(doc, child);
        if is_element(&child, "UNIQUENAME") {
            entry.aliases.push(child_el.required("name")?.to_string());
        } else if is_element(&child, "ADJACENCY") {
            let kind = AdjacencyKind::from_tag(child_el.required("type")?);
            let refs = child_el.required("refs")?;
            entry.adjacencies.push(AdjacencyDecl::new(kind, refs));
        }
    }
    Ok(entry)
}
