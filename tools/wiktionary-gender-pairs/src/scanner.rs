//! Line-oriented page splitter for MediaWiki XML dumps.
//!
//! Only one `<page>...</page>` block is held in memory at a time. A block that
//! is still open when the stream ends is dropped.

use std::io::{self, BufRead};

const PAGE_OPEN: &str = "<page>";
const PAGE_CLOSE: &str = "</page>";

/// Iterator over raw page blocks, each including its line terminators.
pub struct PageBlocks<R> {
    reader: R,
    line: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> PageBlocks<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::with_capacity(4096),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for PageBlocks<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut current_page = String::new();
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }

            let line = String::from_utf8_lossy(&self.line);
            if line.contains(PAGE_OPEN) || !current_page.is_empty() {
                current_page.push_str(&line);
            }
            if line.contains(PAGE_CLOSE) && !current_page.is_empty() {
                return Some(Ok(current_page));
            }
        }
    }
}
