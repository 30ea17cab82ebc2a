//! English locale text, keyed the same way records reference it

use crate::DbResult;
use piratedb::hash::lang_id;
use piratedb::LangRef;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Line-break markup stripped from display text
const LINE_BREAK: &str = "<BR>";

/// Locale strings indexed by hashed key id
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    entries: BTreeMap<i64, String>,
}

impl LocaleTable {
    /// Load a JSON object of `{ "Section_Key": "text" }`
    pub fn load<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> DbResult<Self> {
        let map: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(map))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = BTreeMap::new();
        for (key, text) in pairs {
            let key = key.as_ref();
            if key.is_empty() {
                continue;
            }
            let text = text.as_ref().replace(LINE_BREAK, "");
            if entries.insert(lang_id(key), text).is_some() {
                tracing::warn!("Locale key {} collides with an earlier key", key);
            }
        }
        Self { entries }
    }

    /// Display text for a reference, `None` when absent or unknown
    pub fn lookup(&self, lang: &LangRef) -> Option<&str> {
        lang.id
            .and_then(|id| self.entries.get(&id))
            .map(String::as_str)
    }

    /// Rows for `locale_en`, ordered by id
    pub fn rows(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_line_breaks_are_stripped() {
        let table = LocaleTable::from_pairs([("Items_Cutlass", "Rusty<BR>Cutlass")]);
        assert_eq!(table.lookup(&LangRef::new("Items_Cutlass")), Some("RustyCutlass"));
    }

    #[test]
    fn test_absent_and_unknown_refs() {
        let table = LocaleTable::from_pairs([("Items_Cutlass", "Cutlass")]);
        assert_eq!(table.lookup(&LangRef::absent()), None);
        assert_eq!(table.lookup(&LangRef::new("Items_Hat")), None);
    }

    #[test]
    fn test_empty_keys_are_skipped() {
        let table = LocaleTable::from_pairs([("", "nothing"), ("Units_Skeleton", "Skeleton")]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Pets_Kraken": "Kraken", "Pets_Snack": "Snack"}}"#).unwrap();

        let table = LocaleTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let ids: Vec<i64> = table.rows().map(|(id, _)| id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(LocaleTable::from_json("[1, 2]").is_err());
    }
}
