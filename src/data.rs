//! Dashboard content snapshot.
//!
//! Widgets render from a [`DashboardData`] value loaded once from a JSON file
//! (`scd tui --data FILE`). Without a file the built-in [`DashboardData::sample`]
//! is shown. Every section is optional in the JSON and defaults to empty.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a data file.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be read.
    #[error("Failed to read data file: {path}")]
    Read {
        /// Data file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid dashboard JSON.
    #[error("Invalid data file {path}: {source}")]
    Parse {
        /// Data file path.
        path: PathBuf,
        /// JSON error, with line and column.
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the four widgets display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardData {
    /// Open alerts, most urgent first.
    pub alerts: Vec<Alert>,
    /// Billing totals and monthly history.
    pub finance: FinanceSummary,
    /// Feature modules and how many schools use each.
    pub modules: Vec<ModuleStatus>,
    /// Latest activity events, newest first.
    pub activity: Vec<ActivityEvent>,
}

/// Alert urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
    /// School the alert concerns, if any.
    pub school: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinanceSummary {
    /// Currency code shown next to amounts.
    pub currency: String,
    pub revenue: f64,
    pub expenses: f64,
    /// Invoiced but unpaid.
    pub outstanding: f64,
    /// Oldest first.
    pub monthly: Vec<MonthlyFigure>,
}

impl Default for FinanceSummary {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            revenue: 0.0,
            expenses: 0.0,
            outstanding: 0.0,
            monthly: Vec::new(),
        }
    }
}

impl FinanceSummary {
    /// Revenue minus expenses.
    pub fn net(&self) -> f64 {
        self.revenue - self.expenses
    }

    /// True when there is nothing worth drawing.
    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty() && self.revenue == 0.0 && self.expenses == 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyFigure {
    /// Short label, e.g. `"Mar"`.
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleStatus {
    pub name: String,
    pub active: bool,
    /// Schools with the module enabled.
    pub schools: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Display time, e.g. `"09:42"`.
    pub time: String,
    pub actor: String,
    pub action: String,
}

impl DashboardData {
    /// Loads a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path).map_err(|e| DataError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let data: Self = serde_json::from_str(&content).map_err(|e| DataError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(
            path = %path.display(),
            alerts = data.alerts.len(),
            modules = data.modules.len(),
            activity = data.activity.len(),
            "loaded dashboard data"
        );
        Ok(data)
    }

    /// Built-in demo content.
    pub fn sample() -> Self {
        let month = |month: &str, revenue: f64, expenses: f64| MonthlyFigure {
            month: month.to_string(),
            revenue,
            expenses,
        };
        let module = |name: &str, active: bool, schools: u32| ModuleStatus {
            name: name.to_string(),
            active,
            schools,
        };
        let event = |time: &str, actor: &str, action: &str| ActivityEvent {
            time: time.to_string(),
            actor: actor.to_string(),
            action: action.to_string(),
        };

        Self {
            alerts: vec![
                Alert {
                    severity: Severity::Critical,
                    message: "3 invoices overdue by more than 30 days".to_string(),
                    school: Some("Lincoln Primary".to_string()),
                },
                Alert {
                    severity: Severity::Warning,
                    message: "Subscription expires in 7 days".to_string(),
                    school: Some("Riverside Academy".to_string()),
                },
                Alert {
                    severity: Severity::Info,
                    message: "Term reports generated".to_string(),
                    school: None,
                },
            ],
            finance: FinanceSummary {
                currency: "EUR".to_string(),
                revenue: 48_250.0,
                expenses: 31_900.0,
                outstanding: 6_420.0,
                monthly: vec![
                    month("Jan", 7_200.0, 5_100.0),
                    month("Feb", 7_800.0, 5_300.0),
                    month("Mar", 8_100.0, 5_250.0),
                    month("Apr", 8_400.0, 5_400.0),
                    month("May", 8_150.0, 5_350.0),
                    month("Jun", 8_600.0, 5_500.0),
                ],
            },
            modules: vec![
                module("Attendance", true, 42),
                module("Gradebook", true, 38),
                module("Canteen", true, 17),
                module("Transport", false, 0),
            ],
            activity: vec![
                event("09:42", "m.dupont", "published timetable for 5B"),
                event("09:31", "admin", "enabled Canteen for Riverside Academy"),
                event("09:05", "j.smith", "recorded payment #2231"),
                event("08:47", "system", "nightly backup completed"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let data: DashboardData = serde_json::from_str("{}").expect("parse");
        assert_eq!(data, DashboardData::default());
        assert!(data.finance.is_empty());
        assert_eq!(data.finance.currency, "EUR");
    }

    #[test]
    fn parses_camel_case_document() {
        let json = r#"{
            "alerts": [{"severity": "critical", "message": "Late fees", "school": "North"}],
            "finance": {"currency": "USD", "revenue": 100.0, "expenses": 40.0, "outstanding": 5.0,
                        "monthly": [{"month": "Jan", "revenue": 100.0, "expenses": 40.0}]},
            "modules": [{"name": "Library", "active": false, "schools": 0}],
            "activity": [{"time": "10:00", "actor": "bob", "action": "logged in"}]
        }"#;
        let data: DashboardData = serde_json::from_str(json).expect("parse");
        assert_eq!(data.alerts[0].severity, Severity::Critical);
        assert_eq!(data.alerts[0].school.as_deref(), Some("North"));
        assert_eq!(data.finance.currency, "USD");
        assert_eq!(data.finance.net(), 60.0);
        assert!(!data.modules[0].active);
        assert_eq!(data.activity[0].actor, "bob");
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let json = r#"{"alerts": [{"severity": "meh", "message": "x"}]}"#;
        assert!(serde_json::from_str::<DashboardData>(json).is_err());
    }

    #[test]
    fn load_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("data.json");
        fs::write(&path, "{ nope").expect("write");
        match DashboardData::load(&path) {
            Err(DataError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Parse error, got: {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = DashboardData::load(&dir.path().join("absent.json")).expect_err("should fail");
        assert!(matches!(err, DataError::Read { .. }));
    }

    #[test]
    fn sample_round_trips_through_load() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("sample.json");
        let sample = DashboardData::sample();
        fs::write(&path, serde_json::to_string(&sample).expect("serialize")).expect("write");
        assert_eq!(DashboardData::load(&path).expect("load"), sample);
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
