/// Column names as they appear in the catalog CSV header. The `capsules` and
/// `favicon` columns are historically lowercase.
pub mod columns {
    pub const CATEGORY: &str = "Category";
    pub const PLATFORM_NAME: &str = "Platform Name";
    pub const OFFICIAL_WEBSITE: &str = "Official Website";
    pub const REFERRAL_LINK: &str = "Referral Link";
    pub const NOTES: &str = "Notes";
    pub const STATUS: &str = "Status";
    pub const LOGO: &str = "Logo";
    pub const DESCRIPTION: &str = "Description";
    pub const FEATURES: &str = "Features";
    pub const CAPSULES: &str = "capsules";
    pub const FAVICON: &str = "favicon";
}

/// One catalog entry. List fields are comma-joined in storage and split on
/// load; every element is non-empty after trimming.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub category: String,
    pub platform_name: String,
    pub official_website: String,
    pub referral_link: String,
    pub notes: String,
    pub status: String,
    pub logo_filename: String,
    pub description: String,
    pub features: Vec<String>,
    pub capsules: Vec<String>,
    pub favicon_filename: String,
}

/// Platform name + official website. There is no surrogate key in the CSV, so
/// this pair relocates a record's row on save. The website half is always the
/// value as loaded (or last saved), never an unsaved edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    pub platform_name: String,
    pub official_website: String,
}

impl Record {
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            platform_name: self.platform_name.clone(),
            official_website: self.official_website.clone(),
        }
    }

    pub fn features_text(&self) -> String {
        self.features.join(",")
    }

    pub fn capsules_text(&self) -> String {
        self.capsules.join(",")
    }

    /// Splits a comma-joined storage cell, dropping pieces that are empty
    /// after trimming.
    pub fn split_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|piece| piece.trim())
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_empty_pieces() {
        assert_eq!(Record::split_list("a, b ,,c,"), vec!["a", "b", "c"]);
        assert!(Record::split_list("  ").is_empty());
        assert!(Record::split_list("").is_empty());
    }

    #[test]
    fn list_round_trips_through_text() {
        let record = Record {
            features: vec!["Low fees".to_string(), "Staking".to_string()],
            ..Record::default()
        };
        assert_eq!(record.features_text(), "Low fees,Staking");
        assert_eq!(Record::split_list(&record.features_text()), record.features);
    }
}
