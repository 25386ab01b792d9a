//! SOAP 1.1 envelope parsing and rendering.
//!
//! Decoding strips namespace prefixes from every tag, so callers may bind
//! the envelope namespace to any prefix. The method is the first child of
//! the first `Body` element; its children are the parameters.

use std::borrow::Cow;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::{Params, SoapRequest};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// XML Schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// XML Schema namespace.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
/// Default namespace of the mocked service's response elements.
pub const SERVICE_NS: &str = "http://webtools.japan.nom";

// Byte-for-byte the layout real clients were built against, trailing spaces included.
const ENVELOPE_OPEN: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
    "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\" \n",
    "               xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \n",
    "               xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">\n",
    "    <soap:Body>\n",
);
const ENVELOPE_CLOSE: &str = concat!("    </soap:Body>\n", "</soap:Envelope>");

/// Minimal element tree; only tags, text and nesting matter here.
///
/// `text` is the content before the first child element. Tail text after a
/// child belongs to nobody.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> ApiResult<Self> {
        for attr in start.attributes() {
            attr.map_err(|e| ApiError::malformed(format!("bad attribute: {e}")))?;
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Self::default()
        })
    }

    /// First descendant (not self) named `name`, in document order.
    fn find_descendant(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find_descendant(name)
            }
        })
    }
}

/// Decode a raw request body into the method name and its parameters.
///
/// # Errors
///
/// `ApiError::MalformedRequest` when the body is empty, not UTF-8, not
/// well-formed XML, has no `Body` element, or the `Body` has no child.
pub fn decode(body: &[u8]) -> ApiResult<SoapRequest> {
    let text = std::str::from_utf8(body)
        .map_err(|_| ApiError::malformed("body is not valid UTF-8"))?;
    if text.trim().is_empty() {
        return Err(ApiError::malformed("empty request body"));
    }

    let root = parse_tree(text)?;
    let soap_body = root
        .find_descendant("Body")
        .ok_or_else(|| ApiError::malformed("missing Body element"))?;
    let method = soap_body
        .children
        .first()
        .ok_or_else(|| ApiError::malformed("Body has no method element"))?;

    let params = method
        .children
        .iter()
        .map(|child| (child.name.as_str(), child.text.trim()))
        .collect::<Params>();

    Ok(SoapRequest {
        method: method.name.clone(),
        params,
    })
}

fn parse_tree(text: &str) -> ApiResult<Element> {
    let mut reader = Reader::from_str(text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ApiError::malformed(format!(
                "XML error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ApiError::malformed("multiple root elements"));
                }
                stack.push(Element::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ApiError::malformed("unmatched end tag"))?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                let value = t
                    .unescape()
                    .map_err(|e| ApiError::malformed(format!("bad text content: {e}")))?;
                append_text(&mut stack, &value)?;
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&raw))?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ApiError::malformed("unexpected end of document"));
    }
    root.ok_or_else(|| ApiError::malformed("no root element"))
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> ApiResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ApiError::malformed("multiple root elements")),
    }
    Ok(())
}

fn append_text(stack: &mut [Element], value: &str) -> ApiResult<()> {
    match stack.last_mut() {
        Some(element) if element.children.is_empty() => element.text.push_str(value),
        Some(_) => {}
        None if value.trim().is_empty() => {}
        None => return Err(ApiError::malformed("text outside the root element")),
    }
    Ok(())
}

/// Wrap `fragment` into the response envelope for `method`.
///
/// The fragment is inserted verbatim; values inside it must already be
/// escaped (see [`escape_text`]).
pub fn encode(method: &str, fragment: &str) -> String {
    format!(
        "{ENVELOPE_OPEN}        <{method}Response xmlns=\"{SERVICE_NS}\">\n\
         \x20           <{method}Result>{fragment}</{method}Result>\n\
         \x20       </{method}Response>\n\
         {ENVELOPE_CLOSE}"
    )
}

/// Raw content of the first `{method}Result` element of a response envelope.
pub fn extract_result(envelope: &str, method: &str) -> ApiResult<String> {
    let target = format!("{method}Result");
    let mut reader = Reader::from_str(envelope);

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if start.local_name().as_ref() == target.as_bytes() => {
                let end = start.to_end().into_owned();
                let span = reader
                    .read_to_end(end.name())
                    .map_err(|e| ApiError::malformed(format!("unterminated {target}: {e}")))?;
                let from = usize::try_from(span.start)
                    .map_err(|_| ApiError::internal("span out of range"))?;
                let to = usize::try_from(span.end)
                    .map_err(|_| ApiError::internal("span out of range"))?;
                return Ok(envelope[from..to].to_string());
            }
            Ok(Event::Empty(start)) if start.local_name().as_ref() == target.as_bytes() => {
                return Ok(String::new());
            }
            Ok(Event::Eof) => {
                return Err(ApiError::malformed(format!("no {target} element")));
            }
            Ok(_) => {}
            Err(e) => return Err(ApiError::malformed(format!("XML error: {e}"))),
        }
    }
}

/// Escape a field value for use as element text.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    partial_escape(value)
}
