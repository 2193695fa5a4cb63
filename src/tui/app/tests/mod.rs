pub(crate) use super::*;
pub(crate) use crate::layout::WidgetKind;
pub(crate) use crate::storage::MemoryStorage;
pub(crate) use std::sync::Arc;


pub(crate) fn make_store() -> LayoutStore {
    LayoutStore::load(Arc::new(MemoryStorage::new()), Duration::from_millis(50))
}

/// App over the default layout with 5-row grid units (20 content rows),
/// viewport at screen rows 1..21, 80 columns wide.
pub(crate) fn make_app(store: &LayoutStore) -> App {
    let settings = TuiSettings {
        row_height: 5,
        ..TuiSettings::default()
    };
    let mut app = App::new(DashboardData::sample(), settings);
    app.sync_layout(store);
    app.grid_area = Rect::new(0, 1, 80, 20);
    app
}

pub(crate) fn order_of(store: &LayoutStore) -> Vec<(WidgetKind, i64)> {
    store
        .enabled_widgets()
        .iter()
        .map(|d| (d.id, d.order))
        .collect()
}
