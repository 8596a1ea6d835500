use std::collections::BTreeMap;

pub const NAME_COLUMN: &str = "Name";
pub const FILE_LINK_COLUMN: &str = "File_Link";

/// One data row of the first sheet, keyed by header text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based position among the non-blank data rows.
    pub index: usize,
    pub cells: BTreeMap<String, String>,
}

impl SheetRow {
    pub fn new<K, V>(index: usize, cells: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        SheetRow {
            index,
            cells: cells
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trimmed cell value, `None` when the column is absent or blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME_COLUMN)
    }

    pub fn file_link(&self) -> Option<&str> {
        self.get(FILE_LINK_COLUMN)
    }
}
