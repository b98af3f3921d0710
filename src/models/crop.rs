use serde::{Deserialize, Serialize};

/// One season's crop on a field. Crop names are stored
/// lowercase-trimmed so succession lookups and grouping are
/// case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRecord {
    pub id: Option<i64>,
    pub field_id: i64,
    pub crop_name: String,
    pub season_year: i32,
}

impl CropRecord {
    pub fn new(field_id: i64, crop_name: &str, season_year: i32) -> Self {
        Self {
            id: None,
            field_id,
            crop_name: normalize_crop_name(crop_name),
            season_year,
        }
    }
}

/// Canonical form for crop names used as grouping and lookup keys.
pub fn normalize_crop_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_record_normalizes_name() {
        let record = CropRecord::new(1, "  Porumb ", 2024);
        assert_eq!(record.crop_name, "porumb");
        assert_eq!(record.season_year, 2024);
    }

    #[test]
    fn normalize_handles_diacritics_as_is() {
        // Diacritics are preserved, only case and whitespace change
        assert_eq!(normalize_crop_name("Grâu"), "grâu");
        assert_eq!(normalize_crop_name("RAPIȚĂ"), "rapiță");
    }
}
