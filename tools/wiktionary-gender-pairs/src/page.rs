//! Page block parsing.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{ExtractError, Result};

const TITLE_PATH: &[&[u8]] = &[b"page", b"title"];
const TEXT_PATH: &[&[u8]] = &[b"page", b"revision", b"text"];

/// One dictionary page. `text` is `None` for an empty revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub text: Option<String>,
}

fn at_path(stack: &[Vec<u8>], path: &[&[u8]]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a.as_slice() == *b)
}

/// Parse a `<page>` block. The title is lower-cased.
pub fn parse_page(page_xml: &str) -> Result<Page> {
    let mut reader = Reader::from_str(page_xml);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut title: Option<String> = None;
    let mut text: Option<String> = None;
    // Only the first revision's text counts
    let mut text_closed = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                stack.push(e.local_name().as_ref().to_vec());
                if at_path(&stack, TITLE_PATH) && title.is_none() {
                    title = Some(String::new());
                }
            }
            Event::End(_) => {
                if at_path(&stack, TEXT_PATH) && text.is_some() {
                    text_closed = true;
                }
                stack.pop();
            }
            Event::Text(ref e) => {
                if at_path(&stack, TITLE_PATH) {
                    if let Some(t) = title.as_mut() {
                        t.push_str(&e.unescape()?);
                    }
                } else if at_path(&stack, TEXT_PATH) && !text_closed {
                    text.get_or_insert_with(String::new).push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if at_path(&stack, TEXT_PATH) && !text_closed {
                    text.get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let title = title.ok_or(ExtractError::MissingTitle)?.to_lowercase();
    let text = text.filter(|t| !t.is_empty());

    Ok(Page { title, text })
}
