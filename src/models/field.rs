use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical land parcel with an area in hectares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: Option<i64>,
    pub name: String,
    pub area_ha: f64,
    pub created_at: DateTime<Utc>,
}

impl Field {
    pub fn new(name: &str, area_ha: f64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            area_ha,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_new_sets_name_and_area() {
        let field = Field::new("Lunca Mare", 12.5);
        assert_eq!(field.name, "Lunca Mare");
        assert_eq!(field.area_ha, 12.5);
        assert!(field.id.is_none());
    }
}
