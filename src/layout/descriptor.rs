//! Widget descriptor types and the built-in default layout.
//!
//! A layout is an ordered collection of [`WidgetDescriptor`]s. Each descriptor
//! names a [`WidgetKind`] from a closed set, its grid footprint, its relative
//! render order and whether it is currently shown.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Closed set of dashboard widget kinds.
///
/// Serialized in kebab-case (`"financial-overview"`). A stored layout that
/// names any other id fails to deserialize and is replaced by the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Alert feed (overdue payments, expiring subscriptions, ...).
    Alerts,
    /// Revenue / expense overview with monthly bars.
    FinancialOverview,
    /// Per-module activation status across schools.
    ModuleStatus,
    /// Most recent activity events.
    RealtimeActivity,
}

impl WidgetKind {
    /// Every widget kind, in declaration order.
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Alerts,
        WidgetKind::FinancialOverview,
        WidgetKind::ModuleStatus,
        WidgetKind::RealtimeActivity,
    ];

    /// Wire identifier, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Alerts => "alerts",
            WidgetKind::FinancialOverview => "financial-overview",
            WidgetKind::ModuleStatus => "module-status",
            WidgetKind::RealtimeActivity => "realtime-activity",
        }
    }

    /// Human-readable title used for widget borders.
    pub fn title(self) -> &'static str {
        match self {
            WidgetKind::Alerts => "Alerts",
            WidgetKind::FinancialOverview => "Financial Overview",
            WidgetKind::ModuleStatus => "Module Status",
            WidgetKind::RealtimeActivity => "Realtime Activity",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a [`WidgetKind`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWidgetKindError(pub String);

impl fmt::Display for ParseWidgetKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = WidgetKind::ALL.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "unknown widget '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for ParseWidgetKindError {}

impl FromStr for WidgetKind {
    type Err = ParseWidgetKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        WidgetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ParseWidgetKindError(s.to_string()))
    }
}

/// One widget's placement in the layout.
///
/// Field names are camelCase on the wire (`columnSpan`, `rowSpan`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDescriptor {
    /// Which widget this slot shows.
    pub id: WidgetKind,
    /// Grid columns occupied (>= 1).
    pub column_span: u16,
    /// Grid rows occupied (>= 1).
    pub row_span: u16,
    /// Relative render position among enabled widgets. Need not be contiguous.
    pub order: i64,
    /// Disabled widgets are skipped by the grid but keep their stored position.
    pub enabled: bool,
}

impl WidgetDescriptor {
    /// Creates an enabled descriptor.
    pub fn new(id: WidgetKind, column_span: u16, row_span: u16, order: i64) -> Self {
        Self {
            id,
            column_span,
            row_span,
            order,
            enabled: true,
        }
    }
}

/// Returns the fixed default layout.
///
/// Four widgets, all enabled, with orders `0..=3`.
pub fn default_layout() -> Vec<WidgetDescriptor> {
    vec![
        WidgetDescriptor::new(WidgetKind::Alerts, 1, 1, 0),
        WidgetDescriptor::new(WidgetKind::FinancialOverview, 2, 2, 1),
        WidgetDescriptor::new(WidgetKind::ModuleStatus, 1, 1, 2),
        WidgetDescriptor::new(WidgetKind::RealtimeActivity, 1, 1, 3),
    ]
}

/// Reason a layout collection failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutDefect {
    /// The collection has no descriptors.
    Empty,
    /// The same id appears more than once.
    DuplicateId(WidgetKind),
    /// A descriptor has a zero column or row span.
    ZeroSpan(WidgetKind),
}

impl fmt::Display for LayoutDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutDefect::Empty => write!(f, "layout is empty"),
            LayoutDefect::DuplicateId(id) => write!(f, "duplicate widget id '{id}'"),
            LayoutDefect::ZeroSpan(id) => write!(f, "widget '{id}' has a zero span"),
        }
    }
}

/// Checks the structural invariants of a layout: non-empty, unique ids,
/// positive spans.
pub fn validate(layout: &[WidgetDescriptor]) -> Result<(), LayoutDefect> {
    if layout.is_empty() {
        return Err(LayoutDefect::Empty);
    }
    let mut seen = HashSet::with_capacity(layout.len());
    for d in layout {
        if !seen.insert(d.id) {
            return Err(LayoutDefect::DuplicateId(d.id));
        }
        if d.column_span == 0 || d.row_span == 0 {
            return Err(LayoutDefect::ZeroSpan(d.id));
        }
    }
    Ok(())
}

/// Returns the set of ids present in a layout.
pub fn id_set(layout: &[WidgetDescriptor]) -> HashSet<WidgetKind> {
    layout.iter().map(|d| d.id).collect()
}

/// Returns the enabled descriptors sorted by `order`.
///
/// The sort is stable, so equal orders keep their array position.
pub fn enabled_sorted(layout: &[WidgetDescriptor]) -> Vec<WidgetDescriptor> {
    let mut enabled: Vec<WidgetDescriptor> =
        layout.iter().filter(|d| d.enabled).cloned().collect();
    enabled.sort_by_key(|d| d.order);
    enabled
}
