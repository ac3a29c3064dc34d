//! The school registry: parsing, loading and querying.
//!
//! A [`SchoolDirectory`] is built once from the registry source and is
//! read-only afterwards. Two queries run against it:
//!
//! - [`search`] - case-insensitive substring match over code, school name
//!   and district, bounded to the first matches in directory order
//! - [`find_by_exact_code`] - exact, case-sensitive code lookup
//!
//! ```
//! use schooldir::directory::SchoolDirectory;
//!
//! let source = "district,block,udise_code,school_name,category,area,management\n\
//!               Puri,Gop,21180200303,UGME School,Primary,Rural,Government";
//! let directory = SchoolDirectory::parse(source);
//!
//! assert_eq!(directory.search("ugme").len(), 1);
//! assert!(directory.find_by_exact_code("21180200303").is_some());
//! ```

pub mod loader;
pub mod parser;
pub mod record;
pub mod search;

pub use loader::{LOAD_WARNING, LoadedDirectory, load_from_path, spawn_load};
pub use parser::{ParseMode, ParseReport, RowIssue, RowIssueKind, parse, parse_with_report};
pub use record::{COLUMN_COUNT, Column, SchoolRecord};
pub use search::{DEFAULT_RESULT_LIMIT, find_by_exact_code, search, search_with_limit};

use rustc_hash::{FxHashMap, FxHashSet};
use search::SearchKey;
use std::collections::BTreeMap;

/// Immutable, ordered set of school records
#[derive(Debug, Clone, Default)]
pub struct SchoolDirectory {
    records: Vec<SchoolRecord>,
    /// Lower-cased search fields, parallel to `records`
    keys: Vec<SearchKey>,
    /// Code -> index of the first record carrying it
    code_index: FxHashMap<String, usize>,
}

impl SchoolDirectory {
    /// Build a directory from records, dropping any without a code
    pub fn new(records: Vec<SchoolRecord>) -> Self {
        let records: Vec<SchoolRecord> = records.into_iter().filter(SchoolRecord::has_code).collect();
        let keys = records.iter().map(SearchKey::new).collect();

        let mut code_index = FxHashMap::default();
        for (idx, record) in records.iter().enumerate() {
            code_index.entry(record.udise_code.clone()).or_insert(idx);
        }

        Self {
            records,
            keys,
            code_index,
        }
    }

    /// Parse the registry source leniently
    pub fn parse(source: &str) -> Self {
        Self::new(parse(source))
    }

    pub fn records(&self) -> &[SchoolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn search(&self, query: &str) -> Vec<&SchoolRecord> {
        search(self, query)
    }

    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<&SchoolRecord> {
        search_with_limit(self, query, limit)
    }

    pub fn find_by_exact_code(&self, code: &str) -> Option<&SchoolRecord> {
        find_by_exact_code(self, code)
    }

    pub fn stats(&self) -> DirectoryStats {
        let mut districts = FxHashSet::default();
        let mut blocks = FxHashSet::default();
        let mut by_management: BTreeMap<String, usize> = BTreeMap::new();

        for record in &self.records {
            districts.insert(record.district.as_str());
            blocks.insert((record.district.as_str(), record.block.as_str()));
            *by_management.entry(record.management.clone()).or_insert(0) += 1;
        }

        DirectoryStats {
            records: self.records.len(),
            distinct_codes: self.code_index.len(),
            districts: districts.len(),
            blocks: blocks.len(),
            by_management: by_management.into_iter().collect(),
        }
    }
}

/// Summary counts for a loaded directory
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DirectoryStats {
    pub records: usize,
    pub distinct_codes: usize,
    pub districts: usize,
    /// Blocks are counted per district, the same block name can recur
    pub blocks: usize,
    /// Record count per management type, sorted by name
    pub by_management: Vec<(String, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "district,block,udise_code,school_name,category,area,management
Khordha,Jatni,21150100101,Govt High School,Secondary,Urban,Government
Khordha,Jatni,21150100102,Saraswati Sishu Mandir,Primary,Urban,Private
Puri,Gop,21180200303,UGME School,Primary,Rural,Government
Puri,Jatni,,Nameless,Primary,Rural,Government
Puri,Gop,21180200303,Duplicate Code School,Primary,Rural,Aided
";

    #[test]
    fn test_parse_builds_directory() {
        let dir = SchoolDirectory::parse(SOURCE);
        assert_eq!(dir.len(), 4);
        assert!(!dir.is_empty());
        assert_eq!(dir.records()[0].school_name, "Govt High School");
    }

    #[test]
    fn test_new_drops_records_without_code() {
        let dir = SchoolDirectory::new(vec![
            SchoolRecord::from_fields(&["A", "B", ""]),
            SchoolRecord::from_fields(&["A", "B", "123"]),
        ]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.find_by_exact_code("123").map(|r| r.district.as_str()), Some("A"));
    }

    #[test]
    fn test_default_is_empty() {
        let dir = SchoolDirectory::default();
        assert!(dir.is_empty());
        assert!(dir.search("anything").is_empty());
        assert!(dir.find_by_exact_code("21180200303").is_none());
    }

    #[test]
    fn test_methods_delegate_to_queries() {
        let dir = SchoolDirectory::parse(SOURCE);
        assert_eq!(dir.search("school"), search(&dir, "school"));
        assert_eq!(dir.search_with_limit("school", 1).len(), 1);
        assert_eq!(
            dir.find_by_exact_code("21180200303").unwrap().school_name,
            "UGME School"
        );
    }

    #[test]
    fn test_stats() {
        let stats = SchoolDirectory::parse(SOURCE).stats();

        assert_eq!(stats.records, 4);
        assert_eq!(stats.distinct_codes, 3);
        assert_eq!(stats.districts, 2);
        assert_eq!(stats.blocks, 2);
        assert_eq!(
            stats.by_management,
            vec![
                ("Aided".to_string(), 1),
                ("Government".to_string(), 2),
                ("Private".to_string(), 1),
            ]
        );
    }
}
