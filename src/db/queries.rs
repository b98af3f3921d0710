use crate::db::Database;
use crate::error::Result;
use crate::models::{normalize_crop_name, CropRecord, Expense, ExpenseCategory, Field, Sale};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};
use tracing::warn;

// Field Queries

impl Database {
    pub fn create_field(&self, field: &Field) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO fields (name, area_ha, created_at) VALUES (?1, ?2, ?3)",
                params![field.name, field.area_ha, field.created_at.to_rfc3339()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_fields(&self) -> Result<Vec<Field>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM fields ORDER BY created_at DESC")?;
            let fields = stmt
                .query_map([], row_to_field)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(fields)
        })
    }

    pub fn get_field(&self, id: i64) -> Result<Option<Field>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT * FROM fields WHERE id = ?1", [id], row_to_field)
                .optional()
                .map_err(Into::into)
        })
    }
}

fn row_to_field(row: &Row) -> rusqlite::Result<Field> {
    let created_at_str: String = row.get("created_at")?;
    Ok(Field {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        area_ha: row.get("area_ha")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Expense Queries

impl Database {
    pub fn create_expense(&self, expense: &Expense) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO expenses (field_id, category, crop_name, amount, op_date)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    expense.field_id,
                    expense.category.as_str(),
                    expense.crop_name.as_deref().map(normalize_crop_name),
                    expense.amount,
                    expense.op_date.format("%Y-%m-%d").to_string(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_expenses(&self) -> Result<Vec<Expense>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM expenses ORDER BY op_date DESC")?;
            let expenses = stmt
                .query_map([], row_to_expense)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(expenses)
        })
    }
}

fn row_to_expense(row: &Row) -> rusqlite::Result<Expense> {
    let category_str: String = row.get("category")?;
    let date_str: String = row.get("op_date")?;

    let category = ExpenseCategory::from_str(&category_str).unwrap_or_else(|| {
        warn!(
            category = %category_str,
            "Unknown expense category in database, defaulting to other"
        );
        ExpenseCategory::Other
    });

    Ok(Expense {
        id: Some(row.get("id")?),
        field_id: row.get("field_id")?,
        category,
        crop_name: row.get("crop_name")?,
        amount: row.get("amount")?,
        op_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
    })
}

// Sale Queries

impl Database {
    pub fn create_sale(&self, sale: &Sale) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO sales (field_id, crop_name, quantity_t, unit_price_value, op_date)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    sale.field_id,
                    sale.crop_name.as_deref().map(normalize_crop_name),
                    sale.quantity_t,
                    sale.unit_price_value,
                    sale.op_date.format("%Y-%m-%d").to_string(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_sales(&self) -> Result<Vec<Sale>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM sales ORDER BY op_date DESC")?;
            let sales = stmt
                .query_map([], row_to_sale)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(sales)
        })
    }
}

fn row_to_sale(row: &Row) -> rusqlite::Result<Sale> {
    let date_str: String = row.get("op_date")?;
    Ok(Sale {
        id: Some(row.get("id")?),
        field_id: row.get("field_id")?,
        crop_name: row.get("crop_name")?,
        quantity_t: row.get("quantity_t")?,
        unit_price_value: row.get("unit_price_value")?,
        op_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
    })
}

// Crop Record Queries

impl Database {
    pub fn create_crop_record(&self, record: &CropRecord) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO crops (field_id, crop_name, season_year) VALUES (?1, ?2, ?3)",
                params![
                    record.field_id,
                    normalize_crop_name(&record.crop_name),
                    record.season_year,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Full crop history, newest season first. Duplicate field/year rows
    /// come back newest-inserted first, which makes the advisor's
    /// first-match behavior deterministic.
    pub fn get_crop_history(&self) -> Result<Vec<CropRecord>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT * FROM crops ORDER BY season_year DESC, id DESC")?;
            let records = stmt
                .query_map([], row_to_crop_record)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(records)
        })
    }

    pub fn get_crop_history_for_field(&self, field_id: i64) -> Result<Vec<CropRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM crops WHERE field_id = ?1 ORDER BY season_year DESC, id DESC",
            )?;
            let records = stmt
                .query_map([field_id], row_to_crop_record)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(records)
        })
    }
}

fn row_to_crop_record(row: &Row) -> rusqlite::Result<CropRecord> {
    Ok(CropRecord {
        id: Some(row.get("id")?),
        field_id: row.get("field_id")?,
        crop_name: row.get("crop_name")?,
        season_year: row.get("season_year")?,
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
