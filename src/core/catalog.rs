use std::path::Path;

use crate::core::{
    models::columns,
    textclean,
    NaturalKey,
    Record,
    ReflinksError,
};

/// The catalog CSV as loaded, header order and unknown columns intact. Saves
/// go through a fresh `RawTable` read so edits made by other tools between
/// our load and our save are not clobbered wholesale; the window between the
/// re-read and the rewrite is still unguarded (single-operator tool).
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn read(path: &Path) -> Result<Self, ReflinksError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            // A row wider than the header means the file is malformed; a
            // rewrite would drop the extra cells, so refuse to load it.
            if row.len() > headers.len() {
                return Err(ReflinksError::Custom(format!(
                    "Row {} has {} cells but the header has {} columns",
                    index + 1,
                    row.len(),
                    headers.len()
                )));
            }
            // Short rows are padded so every cell is addressable by header.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }
        Ok(RawTable { headers, rows })
    }

    pub fn write(&self, path: &Path) -> Result<(), ReflinksError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Index of a named column, appending it (with empty cells) when the
    /// catalog predates it. Used for `favicon`, which older files lack.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column(name) {
            return index;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    fn cell<'a>(&self, row: &'a [String], name: &str) -> &'a str {
        self.column(name).and_then(|index| row.get(index)).map(String::as_str).unwrap_or("")
    }

    /// First row matching the natural key, if any.
    pub fn find_row(&self, key: &NaturalKey) -> Option<usize> {
        let name_col = self.column(columns::PLATFORM_NAME)?;
        let website_col = self.column(columns::OFFICIAL_WEBSITE)?;
        self.rows.iter().position(|row| {
            row[name_col] == key.platform_name && row[website_col] == key.official_website
        })
    }

    fn set(&mut self, row: usize, column: usize, value: String) {
        self.rows[row][column] = value;
    }
}

/// Parses the full store into records. Missing optional columns read as empty
/// for every record.
pub fn load_records(path: &Path) -> Result<Vec<Record>, ReflinksError> {
    let table = RawTable::read(path)?;
    let records = table
        .rows
        .iter()
        .map(|row| Record {
            category: table.cell(row, columns::CATEGORY).to_string(),
            platform_name: table.cell(row, columns::PLATFORM_NAME).to_string(),
            official_website: table.cell(row, columns::OFFICIAL_WEBSITE).to_string(),
            referral_link: table.cell(row, columns::REFERRAL_LINK).to_string(),
            notes: table.cell(row, columns::NOTES).to_string(),
            status: table.cell(row, columns::STATUS).to_string(),
            logo_filename: table.cell(row, columns::LOGO).trim().to_string(),
            description: table.cell(row, columns::DESCRIPTION).to_string(),
            features: Record::split_list(table.cell(row, columns::FEATURES)),
            capsules: Record::split_list(table.cell(row, columns::CAPSULES)),
            favicon_filename: table.cell(row, columns::FAVICON).trim().to_string(),
        })
        .collect();
    Ok(records)
}

/// The editable fields of one record, already cleaned, ready to be written
/// into the matching CSV row.
#[derive(Debug, Clone, Default)]
pub struct RecordEdits {
    pub official_website: String,
    pub referral_link: String,
    pub description: String,
    pub features: String,
    pub capsules: String,
    pub logo_filename: String,
}

/// Read-modify-write of one row located by natural key. The whole file is
/// rewritten; unknown columns and column order survive untouched. A missing
/// row fails before anything is written.
pub fn save_record(path: &Path, key: &NaturalKey, edits: &RecordEdits) -> Result<(), ReflinksError> {
    let mut table = RawTable::read(path)?;
    let row = table.find_row(key).ok_or(ReflinksError::RowNotFound)?;

    for (name, value) in [
        (columns::OFFICIAL_WEBSITE, &edits.official_website),
        (columns::REFERRAL_LINK, &edits.referral_link),
        (columns::DESCRIPTION, &edits.description),
        (columns::FEATURES, &edits.features),
        (columns::CAPSULES, &edits.capsules),
        (columns::LOGO, &edits.logo_filename),
    ] {
        let column = table.ensure_column(name);
        table.set(row, column, textclean::clean_cell(value));
    }

    table.write(path)
}

/// Persists just the favicon cell for the record at `key`. Rows that no
/// longer match are skipped silently; the caller still gets its in-memory
/// update and the cell is picked up on the next full save.
pub fn save_favicon(path: &Path, key: &NaturalKey, favicon_filename: &str) -> Result<(), ReflinksError> {
    let mut table = RawTable::read(path)?;
    if let Some(row) = table.find_row(key) {
        let column = table.ensure_column(columns::FAVICON);
        table.set(row, column, favicon_filename.to_string());
        table.write(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SAMPLE: &str = "\
Category,Platform Name,Official Website,Referral Link,Notes,Status,Logo,Description,Features,capsules,Extra
Exchange,Kraken,https://kraken.com,https://kraken.com/ref,Solid,live,logo_Kraken.png,Old desc,\"Spot,Futures\",Secure,keepme
Wallet,Ledger,https://ledger.com,https://ledger.com/ref,,draft,,,,,also-keep
";

    fn sample_file() -> (tempfile::TempDir, std::path::PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ref_links.csv");
        fs::write(&path, SAMPLE).unwrap();
        (tmp, path)
    }

    fn key(name: &str, website: &str) -> NaturalKey {
        NaturalKey { platform_name: name.to_string(), official_website: website.to_string() }
    }

    #[test]
    fn load_maps_columns_and_splits_lists() {
        let (_tmp, path) = sample_file();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].platform_name, "Kraken");
        assert_eq!(records[0].features, vec!["Spot", "Futures"]);
        assert_eq!(records[0].capsules, vec!["Secure"]);
        // No favicon column in this file: every record reads as empty.
        assert_eq!(records[0].favicon_filename, "");
        assert_eq!(records[1].description, "");
    }

    #[test]
    fn save_rewrites_only_edited_cells() {
        let (_tmp, path) = sample_file();
        let edits = RecordEdits {
            official_website: "https://kraken.com".to_string(),
            referral_link: "https://kraken.com/ref2".to_string(),
            description: "New desc".to_string(),
            features: "Spot,Futures,Margin".to_string(),
            capsules: "Secure,Fast".to_string(),
            logo_filename: "logo_Kraken.png".to_string(),
        };
        save_record(&path, &key("Kraken", "https://kraken.com"), &edits).unwrap();

        let table = RawTable::read(&path).unwrap();
        assert_eq!(table.headers[0], "Category");
        assert_eq!(*table.headers.last().unwrap(), "Extra");
        assert_eq!(table.rows[0][table.column("Extra").unwrap()], "keepme");
        assert_eq!(table.rows[0][table.column("Referral Link").unwrap()], "https://kraken.com/ref2");
        // Untouched row survives byte-for-byte at the cell level.
        assert_eq!(table.rows[1][table.column("Extra").unwrap()], "also-keep");
        assert_eq!(table.rows[1][table.column("Status").unwrap()], "draft");
    }

    #[test]
    fn unedited_round_trip_preserves_cells() {
        let (_tmp, path) = sample_file();
        let before = RawTable::read(&path).unwrap();
        let record = &load_records(&path).unwrap()[0];
        let edits = RecordEdits {
            official_website: record.official_website.clone(),
            referral_link: record.referral_link.clone(),
            description: record.description.clone(),
            features: record.features_text(),
            capsules: record.capsules_text(),
            logo_filename: record.logo_filename.clone(),
        };
        save_record(&path, &record.natural_key(), &edits).unwrap();
        let after = RawTable::read(&path).unwrap();
        assert_eq!(before.headers, after.headers);
        assert_eq!(before.rows, after.rows);
    }

    #[test]
    fn save_with_unknown_key_leaves_file_untouched() {
        let (_tmp, path) = sample_file();
        let before = fs::read_to_string(&path).unwrap();
        let result = save_record(&path, &key("Kraken", "https://edited.example"), &RecordEdits::default());
        assert!(matches!(result, Err(ReflinksError::RowNotFound)));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn read_pads_short_rows_but_rejects_long_ones() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("ref_links.csv");

        fs::write(&path, "A,B,C\nx,y\n").unwrap();
        let table = RawTable::read(&path).unwrap();
        assert_eq!(table.rows[0], vec!["x", "y", ""]);

        fs::write(&path, "A,B\nx,y\nx,y,z\n").unwrap();
        let error = RawTable::read(&path).unwrap_err();
        assert_eq!(error.to_string(), "Row 2 has 3 cells but the header has 2 columns");
    }

    #[test]
    fn save_favicon_appends_missing_column() {
        let (_tmp, path) = sample_file();
        save_favicon(&path, &key("Ledger", "https://ledger.com"), "fav_Ledger.png").unwrap();
        let table = RawTable::read(&path).unwrap();
        let favicon_col = table.column("favicon").unwrap();
        assert_eq!(table.rows[1][favicon_col], "fav_Ledger.png");
        assert_eq!(table.rows[0][favicon_col], "");
    }

    #[test]
    fn save_favicon_with_unknown_key_is_a_silent_no_op() {
        let (_tmp, path) = sample_file();
        let before = fs::read_to_string(&path).unwrap();
        save_favicon(&path, &key("Nobody", "https://nobody.example"), "fav_Nobody.png").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
