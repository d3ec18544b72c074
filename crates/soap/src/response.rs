//! Response decoding by element local name

use itpam_errors::{Error, SoapError};
use itpam_types::Dataset;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone)]
struct Element {
    local_name: String,
    attributes: Vec<(String, String)>,
    parent: Option<usize>,
}

impl Element {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Text node and the index of the element that directly contains it
#[derive(Debug, Clone)]
struct TextNode {
    owner: usize,
    text: String,
}

/// A parsed SOAP response
///
/// Elements and text nodes are each stored in document order, so the
/// position of a node is also its rank for "first match" lookups.
#[derive(Debug, Clone)]
pub struct SoapResponse {
    elements: Vec<Element>,
    texts: Vec<TextNode>,
}

impl SoapResponse {
    /// Parse a response body
    ///
    /// # Errors
    ///
    /// Returns `SoapError::MalformedResponse` if the text is not well-formed
    /// XML or has no SOAP `Body` element.
    pub fn parse(xml: &str) -> Result<Self, Error> {
        let mut reader = Reader::from_str(xml);
        let mut elements: Vec<Element> = Vec::new();
        let mut texts: Vec<TextNode> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        // Adjacent text and CDATA form one node until any markup intervenes
        let mut in_text = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                SoapError::MalformedResponse(format!(
                    "error at position {}: {e}",
                    reader.buffer_position()
                ))
            })?;

            match event {
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| SoapError::MalformedResponse(e.to_string()))?;
                    push_text(&mut texts, &stack, &text, in_text);
                    in_text = true;
                    continue;
                }
                Event::CData(cdata) => {
                    let raw = cdata.into_inner();
                    push_text(&mut texts, &stack, &String::from_utf8_lossy(&raw), in_text);
                    in_text = true;
                    continue;
                }
                Event::Start(start) => {
                    let idx = push_element(&mut elements, &stack, &start)?;
                    stack.push(idx);
                }
                Event::Empty(start) => {
                    push_element(&mut elements, &stack, &start)?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
            in_text = false;
        }

        if !stack.is_empty() {
            return Err(SoapError::MalformedResponse("unexpected end of document".into()).into());
        }

        let response = Self { elements, texts };
        if response.body().is_none() {
            return Err(SoapError::MalformedResponse("missing SOAP Body".into()).into());
        }
        Ok(response)
    }

    fn body(&self) -> Option<usize> {
        self.elements
            .iter()
            .position(|element| element.local_name == "Body")
    }

    fn is_child_of(&self, idx: usize, parent_local_name: &str) -> bool {
        self.elements[idx]
            .parent
            .is_some_and(|parent| self.elements[parent].local_name == parent_local_name)
    }

    fn is_descendant_of(&self, mut idx: usize, ancestor: usize) -> bool {
        while let Some(parent) = self.elements[idx].parent {
            if parent == ancestor {
                return true;
            }
            idx = parent;
        }
        false
    }

    /// First text node, in document order, directly inside an element named
    /// `local_name`
    ///
    /// Returns `None` when no such text node exists, mirroring an XPath string
    /// evaluation that yields the empty string.
    #[must_use]
    pub fn find_text(&self, local_name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|node| self.elements[node.owner].local_name == local_name)
            .map(|node| node.text.as_str())
    }

    fn own_text(&self, idx: usize) -> Option<&str> {
        self.texts
            .iter()
            .find(|node| node.owner == idx)
            .map(|node| node.text.as_str())
    }

    /// Like [`find_text`](Self::find_text) but yields an empty string when absent
    #[must_use]
    pub fn first_text(&self, local_name: &str) -> String {
        self.find_text(local_name).unwrap_or_default().to_string()
    }

    /// Fault string when the Body carries a `Fault` element
    ///
    /// Reads `faultstring` (SOAP 1.1) and falls back to `Reason/Text`
    /// (SOAP 1.2). A fault without either yields an empty string.
    #[must_use]
    pub fn fault(&self) -> Option<String> {
        let fault = (0..self.elements.len()).find(|&idx| {
            self.elements[idx].local_name == "Fault" && self.is_child_of(idx, "Body")
        })?;

        let fault_string = self
            .text_within(fault, "faultstring", None)
            .or_else(|| self.text_within(fault, "Text", Some("Reason")))
            .unwrap_or_default();
        Some(fault_string.to_string())
    }

    fn text_within(&self, ancestor: usize, local_name: &str, parent: Option<&str>) -> Option<&str> {
        self.texts
            .iter()
            .filter(|node| self.elements[node.owner].local_name == local_name)
            .filter(|node| parent.is_none_or(|p| self.is_child_of(node.owner, p)))
            .find(|node| self.is_descendant_of(node.owner, ancestor))
            .map(|node| node.text.as_str())
    }

    /// Every `param` directly under a `params` element, in document order
    ///
    /// A missing `name` attribute or text becomes an empty string; the entry
    /// itself is never dropped.
    #[must_use]
    pub fn params_dataset(&self) -> Dataset {
        self.elements
            .iter()
            .enumerate()
            .filter(|(idx, element)| element.local_name == "param" && self.is_child_of(*idx, "params"))
            .map(|(idx, element)| {
                (
                    element.attribute("name").unwrap_or_default().to_string(),
                    self.own_text(idx).unwrap_or_default().to_string(),
                )
            })
            .collect()
    }
}

fn push_element(
    elements: &mut Vec<Element>,
    stack: &[usize],
    start: &BytesStart<'_>,
) -> Result<usize, Error> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SoapError::MalformedResponse(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| SoapError::MalformedResponse(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    let idx = elements.len();
    let parent = stack.last().copied();
    elements.push(Element {
        local_name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        parent,
    });
    Ok(idx)
}

/// Record text inside the open element, extending the previous node when
/// `continues` is set
fn push_text(texts: &mut Vec<TextNode>, stack: &[usize], text: &str, continues: bool) {
    let Some(&owner) = stack.last() else {
        return;
    };
    match texts.last_mut() {
        Some(last) if continues && last.owner == owner => last.text.push_str(text),
        _ => texts.push(TextNode {
            owner,
            text: text.to_string(),
        }),
    }
}
