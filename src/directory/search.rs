use super::SchoolDirectory;
use super::record::SchoolRecord;
use memchr::memmem;

/// Upper bound on search results, keeps search-as-you-type lists short
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Lower-cased copies of the searchable fields of one record
#[derive(Debug, Clone)]
pub(crate) struct SearchKey {
    code: String,
    name: String,
    district: String,
}

impl SearchKey {
    pub(crate) fn new(record: &SchoolRecord) -> Self {
        Self {
            code: record.udise_code.to_lowercase(),
            name: record.school_name.to_lowercase(),
            district: record.district.to_lowercase(),
        }
    }

    #[inline]
    fn matches(&self, finder: &memmem::Finder<'_>) -> bool {
        finder.find(self.code.as_bytes()).is_some()
            || finder.find(self.name.as_bytes()).is_some()
            || finder.find(self.district.as_bytes()).is_some()
    }
}

/// Case-insensitive substring search over code, school name and district.
///
/// Returns at most [`DEFAULT_RESULT_LIMIT`] records in directory order. A
/// blank query returns nothing rather than listing everything.
pub fn search<'a>(directory: &'a SchoolDirectory, query: &str) -> Vec<&'a SchoolRecord> {
    search_with_limit(directory, query, DEFAULT_RESULT_LIMIT)
}

/// [`search`] with an explicit result bound
pub fn search_with_limit<'a>(
    directory: &'a SchoolDirectory,
    query: &str,
    limit: usize,
) -> Vec<&'a SchoolRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    // Only the emptiness check uses the trimmed query; surrounding spaces
    // still take part in matching.
    let needle = query.to_lowercase();
    let finder = memmem::Finder::new(needle.as_bytes());

    directory
        .records
        .iter()
        .zip(directory.keys.iter())
        .filter(|(_, key)| key.matches(&finder))
        .map(|(record, _)| record)
        .take(limit)
        .collect()
}

/// First record whose code equals `code` exactly (case-sensitive)
pub fn find_by_exact_code<'a>(directory: &'a SchoolDirectory, code: &str) -> Option<&'a SchoolRecord> {
    directory
        .code_index
        .get(code)
        .and_then(|&idx| directory.records.get(idx))
}
