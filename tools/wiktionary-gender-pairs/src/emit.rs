//! Output writers.
//!
//! Table lines are array-initializer fragments, `{"KEY", "VALUE"},`, meant to
//! be pasted into another program's source. Quotes inside words are not
//! escaped; Russian headwords never contain them.

use std::io::Write;

use crate::error::Result;
use crate::reconcile::Mismatch;
use crate::table::DirectionTable;

/// Write one line per key with its first counterpart. Returns lines written.
pub fn write_table<W: Write>(table: &DirectionTable, writer: &mut W) -> Result<usize> {
    let mut written = 0;
    for (word, forms) in table.iter() {
        if let Some(first) = forms.first() {
            writeln!(writer, "{{\"{}\", \"{}\"}},", word, first)?;
            written += 1;
        }
    }
    writer.flush()?;
    Ok(written)
}

/// JSONL, one mismatch per line.
pub fn write_mismatch_report<W: Write>(mismatches: &[Mismatch], writer: &mut W) -> Result<()> {
    for mismatch in mismatches {
        let json = serde_json::to_string(mismatch)?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;
    Ok(())
}
