use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A crop sale. Quantity and unit price may be missing on partially
/// entered records; aggregation treats those as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Option<i64>,
    pub field_id: i64,
    pub crop_name: Option<String>,
    pub quantity_t: Option<f64>,
    pub unit_price_value: Option<f64>,
    pub op_date: NaiveDate,
}

impl Sale {
    pub fn new(field_id: i64, quantity_t: f64, unit_price_value: f64) -> Self {
        Self {
            id: None,
            field_id,
            crop_name: None,
            quantity_t: Some(quantity_t),
            unit_price_value: Some(unit_price_value),
            op_date: Utc::now().date_naive(),
        }
    }

    pub fn with_crop(mut self, crop_name: &str) -> Self {
        self.crop_name = Some(crop_name.to_string());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.op_date = date;
        self
    }

    /// Gross revenue for this sale. Missing or non-finite quantity and
    /// price count as zero.
    pub fn revenue(&self) -> f64 {
        let quantity = self.quantity_t.filter(|v| v.is_finite()).unwrap_or(0.0);
        let price = self.unit_price_value.filter(|v| v.is_finite()).unwrap_or(0.0);
        quantity * price
    }
}
