use crate::config::Config;
use crate::datasources::OpenMeteoClient;
use crate::db::Database;
use crate::error::{FarmOpsError, Result};
use crate::logic::{margin, rotation, AlertEngine};
use crate::models::{
    CropRecord, Expense, ExpenseCategory, Field, RotationAdvice, RotationStatus, Sale,
};
use chrono::{Datelike, Local, NaiveDate, Utc};
use dialoguer::Confirm;

/// Command handlers over the loaded config and the local database.
pub struct App {
    pub config: Config,
    pub db: Database,
}

impl App {
    pub fn new(config: Config, db: Database) -> Self {
        Self { config, db }
    }

    /// Resolve a field given on the command line, by name first
    /// (case-insensitive) and by numeric id as a fallback.
    fn resolve_field(&self, reference: &str) -> Result<Field> {
        let fields = self.db.get_fields()?;

        if let Some(field) = fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(reference))
        {
            return Ok(field.clone());
        }

        if let Ok(id) = reference.parse::<i64>() {
            if let Some(field) = self.db.get_field(id)? {
                return Ok(field);
            }
        }

        Err(FarmOpsError::NotFound(format!("field '{}'", reference)))
    }

    // Fields

    pub fn add_field(&self, name: &str, area_ha: f64) -> Result<()> {
        if name.trim().is_empty() {
            return Err(FarmOpsError::InvalidData("field name is empty".into()));
        }
        if !area_ha.is_finite() || area_ha < 0.0 {
            return Err(FarmOpsError::InvalidData(format!(
                "invalid area: {} ha",
                area_ha
            )));
        }

        let id = self.db.create_field(&Field::new(name.trim(), area_ha))?;
        tracing::debug!(id, name, area_ha, "field created");
        println!("Added field {} ({} ha)", name.trim(), area_ha);
        Ok(())
    }

    pub fn list_fields(&self) -> Result<()> {
        let fields = self.db.get_fields()?;
        if fields.is_empty() {
            println!("No fields yet. Add one with `farmops field add <name> <area_ha>`.");
            return Ok(());
        }

        println!("{:<5} {:<24} {:>10}", "id", "name", "area (ha)");
        for field in &fields {
            println!(
                "{:<5} {:<24} {:>10.2}",
                field.id.unwrap_or_default(),
                field.name,
                field.area_ha
            );
        }
        Ok(())
    }

    // Expenses

    pub fn add_expense(
        &self,
        field_ref: &str,
        category: &str,
        amount: f64,
        crop: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<()> {
        let field = self.resolve_field(field_ref)?;
        let category = ExpenseCategory::from_str(category).ok_or_else(|| {
            FarmOpsError::InvalidData(format!(
                "unknown category '{}' (expected one of: fuel, seeds, fertilizer, labor, services, other)",
                category
            ))
        })?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(FarmOpsError::InvalidData(format!(
                "invalid amount: {}",
                amount
            )));
        }

        let mut expense = Expense::new(field.id.unwrap_or_default(), category, amount);
        if let Some(crop) = crop {
            expense = expense.with_crop(crop);
        }
        if let Some(date) = date {
            expense = expense.with_date(date);
        }

        self.db.create_expense(&expense)?;
        println!(
            "Recorded {} {} expense of {:.2} {} on {}",
            category,
            expense
                .crop_name
                .as_deref()
                .map(|c| format!("({})", c))
                .unwrap_or_default(),
            amount,
            self.config.farm.currency,
            field.name
        );
        Ok(())
    }

    pub fn list_expenses(&self) -> Result<()> {
        let expenses = self.db.get_expenses()?;
        if expenses.is_empty() {
            println!("No expenses recorded.");
            return Ok(());
        }

        let fields = self.db.get_fields()?;
        println!(
            "{:<12} {:<18} {:<12} {:<14} {:>12}",
            "date", "field", "category", "crop", "amount"
        );
        for expense in &expenses {
            let field_name = fields
                .iter()
                .find(|f| f.id == Some(expense.field_id))
                .map(|f| f.name.as_str())
                .unwrap_or("—");
            println!(
                "{:<12} {:<18} {:<12} {:<14} {:>12.2}",
                expense.op_date,
                field_name,
                expense.category,
                expense.crop_name.as_deref().unwrap_or("—"),
                expense.amount
            );
        }
        Ok(())
    }

    // Sales

    pub fn add_sale(
        &self,
        field_ref: &str,
        quantity_t: f64,
        unit_price: f64,
        crop: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<()> {
        let field = self.resolve_field(field_ref)?;
        if !quantity_t.is_finite() || quantity_t < 0.0 {
            return Err(FarmOpsError::InvalidData(format!(
                "invalid quantity: {} t",
                quantity_t
            )));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(FarmOpsError::InvalidData(format!(
                "invalid unit price: {}",
                unit_price
            )));
        }

        let mut sale = Sale::new(field.id.unwrap_or_default(), quantity_t, unit_price);
        if let Some(crop) = crop {
            sale = sale.with_crop(crop);
        }
        if let Some(date) = date {
            sale = sale.with_date(date);
        }

        self.db.create_sale(&sale)?;
        println!(
            "Recorded sale of {:.2} t at {:.2} {} from {}",
            quantity_t, unit_price, self.config.farm.currency, field.name
        );
        Ok(())
    }

    pub fn list_sales(&self) -> Result<()> {
        let sales = self.db.get_sales()?;
        if sales.is_empty() {
            println!("No sales recorded.");
            return Ok(());
        }

        let fields = self.db.get_fields()?;
        println!(
            "{:<12} {:<18} {:<14} {:>10} {:>12} {:>12}",
            "date", "field", "crop", "qty (t)", "unit price", "revenue"
        );
        for sale in &sales {
            let field_name = fields
                .iter()
                .find(|f| f.id == Some(sale.field_id))
                .map(|f| f.name.as_str())
                .unwrap_or("—");
            println!(
                "{:<12} {:<18} {:<14} {:>10.2} {:>12.2} {:>12.2}",
                sale.op_date,
                field_name,
                sale.crop_name.as_deref().unwrap_or("—"),
                margin::safe(sale.quantity_t),
                margin::safe(sale.unit_price_value),
                sale.revenue()
            );
        }
        Ok(())
    }

    // Rotation

    /// Classify a proposal without touching the database.
    pub fn classify_proposal(
        &self,
        field: &Field,
        crop: &str,
        year: i32,
    ) -> Result<RotationAdvice> {
        let history = self.db.get_crop_history()?;
        Ok(rotation::classify(
            &history,
            field.id.unwrap_or_default(),
            crop,
            year,
        ))
    }

    /// Check a proposed crop/year and persist it. A proposal classified
    /// avoid needs confirmation (or `assume_yes`) before it is recorded.
    pub fn propose_crop(
        &self,
        field_ref: &str,
        crop: &str,
        year: Option<i32>,
        assume_yes: bool,
    ) -> Result<()> {
        let field = self.resolve_field(field_ref)?;
        let year = year.unwrap_or_else(|| Local::now().year());

        let advice = self.classify_proposal(&field, crop, year)?;
        println!(
            "{} {} on {} in {}: {} — {}",
            advice.status.symbol(),
            crop,
            field.name,
            year,
            advice.status,
            advice.note
        );

        if advice.status == RotationStatus::Avoid && !assume_yes {
            let proceed = Confirm::new()
                .with_prompt(format!("Warning: {}. Record anyway?", advice.note))
                .default(false)
                .interact()
                .map_err(|e| FarmOpsError::InvalidData(format!("Input error: {}", e)))?;
            if !proceed {
                println!("Not recorded.");
                return Ok(());
            }
        }

        self.db
            .create_crop_record(&CropRecord::new(field.id.unwrap_or_default(), crop, year))?;
        println!("Recorded {} on {} for {}", crop, field.name, year);
        Ok(())
    }

    pub fn rotation_history(&self, field_ref: Option<&str>) -> Result<()> {
        let records = match field_ref {
            Some(reference) => {
                let field = self.resolve_field(reference)?;
                self.db
                    .get_crop_history_for_field(field.id.unwrap_or_default())?
            }
            None => self.db.get_crop_history()?,
        };

        if records.is_empty() {
            println!("No crop history yet.");
            return Ok(());
        }

        let fields = self.db.get_fields()?;
        for record in &records {
            let field_name = fields
                .iter()
                .find(|f| f.id == Some(record.field_id))
                .map(|f| f.name.as_str())
                .unwrap_or("—");
            println!("{} — {}: {}", record.season_year, field_name, record.crop_name);
        }
        Ok(())
    }

    // Margin

    pub fn margin_report(&self) -> Result<()> {
        let fields = self.db.get_fields()?;
        let expenses = self.db.get_expenses()?;
        let sales = self.db.get_sales()?;

        let summary = margin::aggregate(&fields, &expenses, &sales);
        let currency = &self.config.farm.currency;

        println!("Margin report — {}", self.config.farm.name);
        println!();
        println!("  Total area:     {:>12.2} ha", summary.total_ha);
        println!(
            "  Total cost:     {:>12.2} {}",
            summary.total_expenses, currency
        );
        println!(
            "  Total revenue:  {:>12.2} {}",
            summary.total_revenue, currency
        );
        println!(
            "  Cost/ha:        {:>12.2} {}",
            summary.cost_per_ha, currency
        );
        println!(
            "  Revenue/ha:     {:>12.2} {}",
            summary.revenue_per_ha, currency
        );
        println!(
            "  Margin/ha:      {:>12.2} {}",
            summary.margin_per_ha, currency
        );

        if !summary.by_crop.is_empty() {
            println!();
            println!(
                "{:<16} {:>12} {:>12} {:>10} {:>12} {:>10}",
                "crop", "expenses", "revenue", "cost/ha", "revenue/ha", "margin/ha"
            );
            for row in &summary.by_crop {
                println!(
                    "{:<16} {:>12.2} {:>12.2} {:>10.2} {:>12.2} {:>10.2}",
                    row.crop,
                    row.expenses,
                    row.revenue,
                    row.cost_per_ha,
                    row.revenue_per_ha,
                    row.margin_per_ha
                );
            }
            println!();
            println!(
                "Note: per-crop figures share the farm's total hectares as denominator; \
                 crop-level area is not tracked."
            );
        }
        Ok(())
    }

    // Alerts

    pub async fn check_alerts(&self, place: Option<&str>) -> Result<()> {
        let client = OpenMeteoClient::new(self.config.weather.clone());
        let forecast = client.fetch_forecast(place).await?;
        tracing::debug!(points = forecast.points.len(), "forecast fetched");

        let engine = AlertEngine::new();
        let alerts = engine.evaluate(&forecast);

        if alerts.is_empty() {
            println!("✅ No critical alerts for the next 72h.");
            return Ok(());
        }

        for alert in &alerts {
            println!(
                "{} [{}] {}: {}",
                alert.severity.symbol(),
                alert.severity,
                alert.title,
                alert.message
            );
        }
        Ok(())
    }

    // Check

    pub async fn check(&self) -> Result<()> {
        println!("Config: OK ({})", self.config.farm.name);
        println!("Database: OK ({})", self.db.path().display());

        let client = OpenMeteoClient::new(self.config.weather.clone());
        match client.test_connection().await {
            Ok(true) => println!("Open-Meteo: OK"),
            Ok(false) => println!("Open-Meteo: OFFLINE"),
            Err(e) => println!("Open-Meteo: OFFLINE ({})", e),
        }
        Ok(())
    }

    /// Default view when farmops runs without a subcommand.
    pub fn dashboard(&self) -> Result<()> {
        let fields = self.db.get_fields()?;
        let expenses = self.db.get_expenses()?;
        let sales = self.db.get_sales()?;
        let summary = margin::aggregate(&fields, &expenses, &sales);

        println!("{} — {}", self.config.farm.name, Utc::now().date_naive());
        println!(
            "  {} fields, {:.2} ha | {} expenses | {} sales",
            fields.len(),
            summary.total_ha,
            expenses.len(),
            sales.len()
        );
        println!(
            "  Margin/ha: {:.2} {} (cost {:.2}, revenue {:.2})",
            summary.margin_per_ha,
            self.config.farm.currency,
            summary.cost_per_ha,
            summary.revenue_per_ha
        );
        println!();
        println!("Run `farmops --help` for commands.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(Config::default(), Database::open_in_memory().unwrap())
    }

    #[test]
    fn resolve_field_by_name_and_id() {
        let app = test_app();
        let id = app.db.create_field(&Field::new("Lunca Mare", 10.0)).unwrap();

        assert_eq!(app.resolve_field("lunca mare").unwrap().id, Some(id));
        assert_eq!(app.resolve_field(&id.to_string()).unwrap().id, Some(id));
        assert!(app.resolve_field("missing").is_err());
    }

    #[test]
    fn add_field_rejects_bad_area() {
        let app = test_app();
        assert!(app.add_field("ok", 5.0).is_ok());
        assert!(app.add_field("neg", -1.0).is_err());
        assert!(app.add_field("nan", f64::NAN).is_err());
        assert!(app.add_field("  ", 5.0).is_err());
    }

    #[test]
    fn propose_crop_records_with_assume_yes() {
        let app = test_app();
        app.add_field("Valea", 4.0).unwrap();
        let field = app.resolve_field("Valea").unwrap();

        app.propose_crop("Valea", "porumb", Some(2023), true).unwrap();
        // Maize after maize classifies avoid; --yes records it anyway
        app.propose_crop("Valea", "porumb", Some(2024), true).unwrap();

        let history = app
            .db
            .get_crop_history_for_field(field.id.unwrap())
            .unwrap();
        assert_eq!(history.len(), 2);

        let advice = app.classify_proposal(&field, "porumb", 2025).unwrap();
        assert_eq!(advice.status, RotationStatus::Avoid);
    }
}
