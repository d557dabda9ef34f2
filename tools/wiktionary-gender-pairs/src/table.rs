//! Word → counterpart tables for both gender directions.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ExtractError, Result};
use crate::features::GenderForms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    MascToFem,
    FemToMasc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::MascToFem => f.write_str("masc_to_fem"),
            Direction::FemToMasc => f.write_str("fem_to_masc"),
        }
    }
}

/// Insertion-ordered mapping from a word to its counterpart forms.
#[derive(Debug, Clone)]
pub struct DirectionTable {
    direction: Direction,
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl DirectionTable {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.index
            .get(word)
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(word, forms)| (word.as_str(), forms.as_slice()))
    }

    /// Set `word`'s counterparts. Re-assigning the same sequence is a no-op;
    /// a different one is a contradiction.
    pub fn assign(&mut self, word: &str, forms: Vec<String>) -> Result<()> {
        if let Some(&i) = self.index.get(word) {
            let existing = &self.entries[i].1;
            if *existing != forms {
                return Err(ExtractError::Contradiction {
                    table: self.direction,
                    key: word.to_string(),
                    existing: existing.clone(),
                    new: forms,
                });
            }
            return Ok(());
        }
        self.insert_new(word.to_string(), forms);
        Ok(())
    }

    /// Add an entry for a word not yet in the table.
    pub(crate) fn insert_new(&mut self, word: String, forms: Vec<String>) {
        debug_assert!(!self.index.contains_key(&word));
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, forms));
    }
}

/// The masculine→feminine and feminine→masculine tables built from one dump.
#[derive(Debug, Clone)]
pub struct GenderTables {
    pub masc_to_fem: DirectionTable,
    pub fem_to_masc: DirectionTable,
}

impl Default for GenderTables {
    fn default() -> Self {
        Self {
            masc_to_fem: DirectionTable::new(Direction::MascToFem),
            fem_to_masc: DirectionTable::new(Direction::FemToMasc),
        }
    }
}

impl GenderTables {
    /// Record one page's forms under its title. Feminine forms describe a
    /// masculine headword and vice versa; a page may feed both tables.
    /// A form equal to the title is the headword itself, not a counterpart.
    pub fn add_page(&mut self, title: &str, forms: &GenderForms) -> Result<()> {
        let feminine = counterparts(title, forms.feminine_forms());
        if !feminine.is_empty() {
            self.masc_to_fem.assign(title, feminine)?;
        }
        let masculine = counterparts(title, forms.masculine_forms());
        if !masculine.is_empty() {
            self.fem_to_masc.assign(title, masculine)?;
        }
        Ok(())
    }
}

fn counterparts(title: &str, mut forms: Vec<String>) -> Vec<String> {
    forms.retain(|form| form != title);
    forms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parse_features;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_redefinition_is_allowed() {
        let mut table = DirectionTable::new(Direction::MascToFem);
        table.assign("кот", strings(&["кошка"])).unwrap();
        table.assign("кот", strings(&["кошка"])).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("кот"), Some(&strings(&["кошка"])[..]));
    }

    #[test]
    fn differing_redefinition_is_a_contradiction() {
        let mut table = DirectionTable::new(Direction::MascToFem);
        table.assign("кот", strings(&["кошка"])).unwrap();
        let err = table.assign("кот", strings(&["котиха"])).unwrap_err();
        match &err {
            ExtractError::Contradiction { table, key, existing, new } => {
                assert_eq!(*table, Direction::MascToFem);
                assert_eq!(key, "кот");
                assert_eq!(existing, &strings(&["кошка"]));
                assert_eq!(new, &strings(&["котиха"]));
            }
            other => panic!("unexpected error: {other}"),
        }
        let message = err.to_string();
        assert_eq!(
            message,
            r#"conflicting entries found for masc_to_fem['кот']: ["кошка"]/["котиха"]"#
        );
        assert_eq!(table.get("кот"), Some(&strings(&["кошка"])[..]));
    }

    #[test]
    fn order_matters_for_contradiction() {
        let mut table = DirectionTable::new(Direction::FemToMasc);
        table.assign("a", strings(&["x", "y"])).unwrap();
        assert!(table.assign("a", strings(&["y", "x"])).is_err());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut table = DirectionTable::new(Direction::MascToFem);
        table.assign("в", strings(&["1"])).unwrap();
        table.assign("а", strings(&["2"])).unwrap();
        table.assign("б", strings(&["3"])).unwrap();
        table.assign("в", strings(&["1"])).unwrap();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["в", "а", "б"]);
    }

    #[test]
    fn page_with_feminine_forms_feeds_masc_to_fem() {
        let mut tables = GenderTables::default();
        tables
            .add_page("учитель", &parse_features("ru-noun+|f=учи́тельница|f2=училка"))
            .unwrap();
        assert_eq!(
            tables.masc_to_fem.get("учитель"),
            Some(&strings(&["учительница", "училка"])[..])
        );
        assert!(tables.fem_to_masc.is_empty());
    }

    #[test]
    fn page_may_feed_both_tables() {
        let mut tables = GenderTables::default();
        tables.add_page("x", &parse_features("m=a|f=b")).unwrap();
        assert_eq!(tables.masc_to_fem.get("x"), Some(&strings(&["b"])[..]));
        assert_eq!(tables.fem_to_masc.get("x"), Some(&strings(&["a"])[..]));
    }

    #[test]
    fn headword_listed_as_its_own_counterpart_is_ignored() {
        let mut tables = GenderTables::default();
        tables.add_page("кот", &parse_features("m=кот|f=кошка")).unwrap();
        assert_eq!(tables.masc_to_fem.get("кот"), Some(&strings(&["кошка"])[..]));
        assert!(tables.fem_to_masc.is_empty());
    }

    #[test]
    fn contradiction_in_fem_to_masc_names_that_table() {
        let mut tables = GenderTables::default();
        tables.add_page("кошка", &parse_features("m=кот")).unwrap();
        let err = tables
            .add_page("кошка", &parse_features("m=котяра"))
            .unwrap_err();
        assert!(err.to_string().starts_with("conflicting entries found for fem_to_masc['кошка']"));
    }
}
