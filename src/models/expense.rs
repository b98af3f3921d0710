use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Fuel,
    Seeds,
    Fertilizer,
    Labor,
    Services,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Fuel => "fuel",
            ExpenseCategory::Seeds => "seeds",
            ExpenseCategory::Fertilizer => "fertilizer",
            ExpenseCategory::Labor => "labor",
            ExpenseCategory::Services => "services",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fuel" => Some(ExpenseCategory::Fuel),
            "seeds" => Some(ExpenseCategory::Seeds),
            "fertilizer" => Some(ExpenseCategory::Fertilizer),
            "labor" => Some(ExpenseCategory::Labor),
            "services" => Some(ExpenseCategory::Services),
            "other" => Some(ExpenseCategory::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [ExpenseCategory] {
        &[
            ExpenseCategory::Fuel,
            ExpenseCategory::Seeds,
            ExpenseCategory::Fertilizer,
            ExpenseCategory::Labor,
            ExpenseCategory::Services,
            ExpenseCategory::Other,
        ]
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cost booked against a field. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Option<i64>,
    pub field_id: i64,
    pub category: ExpenseCategory,
    pub crop_name: Option<String>,
    pub amount: f64,
    pub op_date: NaiveDate,
}

impl Expense {
    pub fn new(field_id: i64, category: ExpenseCategory, amount: f64) -> Self {
        Self {
            id: None,
            field_id,
            category,
            crop_name: None,
            amount,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_category_from_str_valid() {
        assert_eq!(
            ExpenseCategory::from_str("fuel"),
            Some(ExpenseCategory::Fuel)
        );
        assert_eq!(
            ExpenseCategory::from_str("Fertilizer"),
            Some(ExpenseCategory::Fertilizer)
        );
        assert_eq!(
            ExpenseCategory::from_str(" labor "),
            Some(ExpenseCategory::Labor)
        );
    }

    #[test]
    fn expense_category_from_str_invalid() {
        assert_eq!(ExpenseCategory::from_str("diesel"), None);
        assert_eq!(ExpenseCategory::from_str(""), None);
    }

    #[test]
    fn expense_category_round_trip() {
        for category in ExpenseCategory::all() {
            assert_eq!(
                ExpenseCategory::from_str(category.as_str()),
                Some(*category),
                "Round-trip failed for {:?}",
                category
            );
        }
    }

    #[test]
    fn expense_builder_pattern() {
        let expense = Expense::new(1, ExpenseCategory::Seeds, 450.0)
            .with_crop("grâu")
            .with_date(NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());

        assert_eq!(expense.field_id, 1);
        assert_eq!(expense.category, ExpenseCategory::Seeds);
        assert_eq!(expense.crop_name, Some("grâu".to_string()));
        assert_eq!(expense.amount, 450.0);
        assert_eq!(
            expense.op_date,
            NaiveDate::from_ymd_opt(2024, 10, 2).unwrap()
        );
    }
}
