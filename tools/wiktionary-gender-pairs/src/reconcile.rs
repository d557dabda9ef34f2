//! Cross-checking the two direction tables against each other.
//!
//! Missing reverse entries are inferred; disagreements are returned as
//! [`Mismatch`] values for the caller to report. Nothing here is fatal.

use std::fmt;

use serde::Serialize;

use crate::table::{DirectionTable, GenderTables};

/// A pair listed in one direction but not confirmed by the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub masculine: String,
    pub feminine: String,
    pub masc_to_fem: Vec<String>,
    pub fem_to_masc: Vec<String>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflicting entries: masc_to_fem['{}'] = {:?}, fem_to_masc['{}'] = {:?}",
            self.masculine, self.masc_to_fem, self.feminine, self.fem_to_masc
        )
    }
}

/// For every pair in `source`, make sure `target` maps back. Returns the
/// pairs where `target` already had the counterpart without the back link,
/// as `(source word, source forms, target word, target forms)`.
fn mirror_into(
    source: &DirectionTable,
    target: &mut DirectionTable,
) -> Vec<(String, Vec<String>, String, Vec<String>)> {
    let mut conflicts = Vec::new();
    for (word, forms) in source.iter() {
        for form in forms {
            match target.get(form) {
                None => target.insert_new(form.clone(), vec![word.to_string()]),
                Some(back) if !back.iter().any(|w| w == word) => conflicts.push((
                    word.to_string(),
                    forms.to_vec(),
                    form.clone(),
                    back.to_vec(),
                )),
                Some(_) => {}
            }
        }
    }
    conflicts
}

/// Masculine-first, then feminine-first; the second pass sees what the
/// first inserted. Run once per extraction.
pub fn reconcile(tables: &mut GenderTables) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    for (masculine, masc_to_fem, feminine, fem_to_masc) in
        mirror_into(&tables.masc_to_fem, &mut tables.fem_to_masc)
    {
        mismatches.push(Mismatch {
            masculine,
            feminine,
            masc_to_fem,
            fem_to_masc,
        });
    }

    for (feminine, fem_to_masc, masculine, masc_to_fem) in
        mirror_into(&tables.fem_to_masc, &mut tables.masc_to_fem)
    {
        mismatches.push(Mismatch {
            masculine,
            feminine,
            masc_to_fem,
            fem_to_masc,
        });
    }

    mismatches
}
