use papersum_core::SearchOutcome;
use papersum_core::present::ExpansionMap;

use super::App;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::SearchFinished { id, result } => {
                match self.search.complete(id, result) {
                    SearchOutcome::Replaced(count) => {
                        tracing::info!(id, count, "search results replaced");
                        self.paper_cursor = 0;
                        // Ids repeat across searches; a new list starts collapsed.
                        self.expansion = ExpansionMap::new();
                    }
                    // Logged by the controller; the previous list stays on screen.
                    SearchOutcome::Failed(_) | SearchOutcome::Superseded => {}
                }
            }
            BackendEvent::AnalysisFinished { id, result } => {
                if self.analysis.complete(id, result, &mut self.notifier) {
                    self.result_scroll = 0;
                }
            }
            BackendEvent::FileRead { name, result } => {
                self.analysis.apply_ingest(&name, result, &mut self.notifier);
            }
        }
    }
}
