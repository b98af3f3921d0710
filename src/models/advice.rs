use serde::{Deserialize, Serialize};

/// Classification of a proposed crop succession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationStatus {
    Ok,
    Avoid,
    Prefer,
}

impl RotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationStatus::Ok => "ok",
            RotationStatus::Avoid => "avoid",
            RotationStatus::Prefer => "prefer",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RotationStatus::Ok => "·",
            RotationStatus::Avoid => "✗",
            RotationStatus::Prefer => "✓",
        }
    }
}

impl std::fmt::Display for RotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of checking a proposal against a field's crop history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationAdvice {
    pub status: RotationStatus,
    pub note: String,
}

impl RotationAdvice {
    pub fn new(status: RotationStatus, note: impl Into<String>) -> Self {
        Self {
            status,
            note: note.into(),
        }
    }
}

/// Farm-wide cost/revenue/margin figures plus the per-crop breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarginSummary {
    pub total_ha: f64,
    pub total_expenses: f64,
    pub total_revenue: f64,
    pub cost_per_ha: f64,
    pub revenue_per_ha: f64,
    pub margin_per_ha: f64,
    pub by_crop: Vec<CropMarginRow>,
}

/// One crop's aggregated figures. Per-hectare values use the farm's
/// total hectares as a shared denominator since crop-level area is not
/// tracked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropMarginRow {
    pub crop: String,
    pub expenses: f64,
    pub revenue: f64,
    pub cost_per_ha: f64,
    pub revenue_per_ha: f64,
    pub margin_per_ha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Advisory,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Advisory => "Advisory",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Advisory => "→",
            Severity::Warning => "⚠",
            Severity::Critical => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An actionable weather alert produced by the alert rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl WeatherAlert {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_status_display() {
        assert_eq!(RotationStatus::Ok.as_str(), "ok");
        assert_eq!(RotationStatus::Avoid.as_str(), "avoid");
        assert_eq!(RotationStatus::Prefer.as_str(), "prefer");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Advisory);
        assert!(Severity::Advisory > Severity::Info);
    }
}
