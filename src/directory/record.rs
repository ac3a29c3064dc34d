use serde::{Deserialize, Serialize};

/// Number of positional columns in a registry row
pub const COLUMN_COUNT: usize = 7;

/// Positional column of the registry source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Column {
    District = 0,
    Block = 1,
    UdiseCode = 2,
    SchoolName = 3,
    Category = 4,
    Area = 5,
    Management = 6,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::District,
        Column::Block,
        Column::UdiseCode,
        Column::SchoolName,
        Column::Category,
        Column::Area,
        Column::Management,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Header name as it appears in the source file
    pub fn name(self) -> &'static str {
        match self {
            Column::District => "district",
            Column::Block => "block",
            Column::UdiseCode => "udise_code",
            Column::SchoolName => "school_name",
            Column::Category => "category",
            Column::Area => "area",
            Column::Management => "management",
        }
    }
}

/// One row of the school registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub district: String,
    pub block: String,
    /// Exact-match key, usually 11 digits
    pub udise_code: String,
    pub school_name: String,
    pub category: String,
    pub area: String,
    pub management: String,
}

impl SchoolRecord {
    /// Build a record from positional fields.
    /// Fields are trimmed; missing trailing fields become empty strings and
    /// anything past the last column is ignored.
    pub fn from_fields(fields: &[&str]) -> Self {
        let get = |col: Column| {
            fields
                .get(col.index())
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            district: get(Column::District),
            block: get(Column::Block),
            udise_code: get(Column::UdiseCode),
            school_name: get(Column::SchoolName),
            category: get(Column::Category),
            area: get(Column::Area),
            management: get(Column::Management),
        }
    }

    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::District => &self.district,
            Column::Block => &self.block,
            Column::UdiseCode => &self.udise_code,
            Column::SchoolName => &self.school_name,
            Column::Category => &self.category,
            Column::Area => &self.area,
            Column::Management => &self.management,
        }
    }

    /// A record without a code is not a directory entry
    pub fn has_code(&self) -> bool {
        !self.udise_code.is_empty()
    }
}
