//! Language section and noun template extraction from page wikitext.

use lazy_static::lazy_static;
use regex::{Match, Regex};

lazy_static! {
    static ref RUSSIAN_SECTION: Regex = Regex::new(r"==Russian==").unwrap();
    static ref LANGUAGE_SECTION: Regex = Regex::new(r"==[^=]+==").unwrap();
    static ref NOUN_TEMPLATE: Regex = Regex::new(r"===Noun===\n\{\{(.*)\}\}").unwrap();
}

/// First match of a level-2 heading pattern that is not part of a deeper
/// heading, i.e. neither preceded nor followed by another `=`.
fn find_level2_heading<'t>(pattern: &Regex, text: &'t str) -> Option<Match<'t>> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(m) = pattern.find_at(text, start) {
        let open = m.start() == 0 || bytes[m.start() - 1] != b'=';
        let close = bytes.get(m.end()) != Some(&b'=');
        if open && close {
            return Some(m);
        }
        // Patterns start with '=', so this stays on a char boundary
        start = m.start() + 1;
    }
    None
}

/// Text of the Russian section, from the end of its heading up to the next
/// language heading or the end of the page.
pub fn russian_section(text: &str) -> Option<&str> {
    let heading = find_level2_heading(&RUSSIAN_SECTION, text)?;
    let section = &text[heading.end()..];
    Some(match find_level2_heading(&LANGUAGE_SECTION, section) {
        Some(next) => &section[..next.start()],
        None => section,
    })
}

/// Inner content of the template line directly under the `===Noun===` heading.
pub fn noun_template(section: &str) -> Option<&str> {
    NOUN_TEMPLATE
        .captures(section)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}
