use super::*;
use crate::layout::reorder::commit_move;

impl App {
    /// Applies an input [`Action`] to the layout store and refreshes the grid.
    pub fn apply(&mut self, action: Action, store: &mut LayoutStore) {
        match action {
            Action::None => {}
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Toggle(kind) => match store.toggle_widget(kind) {
                Some(enabled) => {
                    let verb = if enabled { "shown" } else { "hidden" };
                    self.set_status(format!("{} {verb}", kind.title()));
                    self.sync_layout(store);
                }
                None => {
                    tracing::warn!(widget = %kind, "toggle for widget missing from layout");
                }
            },
            Action::Reset => {
                store.reset_layout();
                self.focused = None;
                self.scroll = 0;
                self.sync_layout(store);
                self.set_status("Layout reset to defaults");
            }
            Action::Move { from, to } => {
                let title = self.grid.slot(from).map(|s| s.id.title());
                match commit_move(store, from, to) {
                    Ok(moved) => {
                        self.sync_layout(store);
                        self.focused = Some(to);
                        self.ensure_focused_visible();
                        if moved {
                            if let Some(title) = title {
                                self.set_status(format!("Moved {title}"));
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("reorder failed: {e}");
                        self.set_status(format!("Move failed: {e}"));
                        self.sync_layout(store);
                    }
                }
            }
        }
    }
}
