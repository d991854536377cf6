//! Roles and responsibilities table parsed from the semi-structured input.

use serde::{Deserialize, Serialize};

/// Separates rows in the roles/responsibilities blob.
pub const ROW_DELIMITER: char = '&';

/// Separates columns within a row.
pub const COLUMN_DELIMITER: char = ',';

/// Columns a row needs to be kept.
const REQUIRED_COLUMNS: usize = 4;

/// One retained row: identifier, role, function, responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRow {
    pub id: String,
    pub role: String,
    pub function: String,
    pub responsibility: String,
}

/// Rows parsed from a roles/responsibilities blob, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolesTable {
    rows: Vec<RoleRow>,
}

impl RolesTable {
    /// Parses the blob.
    ///
    /// Blank rows are skipped. Trailing empty columns are discarded before
    /// counting, and rows left with fewer than four columns are dropped
    /// without error. Columns beyond the fourth are ignored. Cell text is
    /// kept verbatim, surrounding whitespace included.
    pub fn parse(input: &str) -> Self {
        let rows = input
            .split(ROW_DELIMITER)
            .filter(|row| !row.trim().is_empty())
            .filter_map(|row| {
                let mut columns: Vec<&str> = row.split(COLUMN_DELIMITER).collect();
                while columns.last().is_some_and(|c| c.is_empty()) {
                    columns.pop();
                }
                if columns.len() < REQUIRED_COLUMNS {
                    return None;
                }
                Some(RoleRow {
                    id: columns[0].to_string(),
                    role: columns[1].to_string(),
                    function: columns[2].to_string(),
                    responsibility: columns[3].to_string(),
                })
            })
            .collect();

        Self { rows }
    }

    /// Parses an optional blob; absent or blank input yields `None`.
    pub fn from_optional(input: Option<&str>) -> Option<Self> {
        input
            .filter(|s| !s.trim().is_empty())
            .map(Self::parse)
    }

    pub fn rows(&self) -> &[RoleRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
