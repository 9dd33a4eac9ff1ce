use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u001_settlement::RecordReturn;
use contracts::usecases::u002_order_out::IssueOrder;
use contracts::usecases::u003_debt_summary::DebtOverview;
use contracts::usecases::u004_history::OrderHistory;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Pages reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Settlement,
    OrderOut,
    History,
    DebtSummary,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Self::Dashboard,
        Self::OrderOut,
        Self::Settlement,
        Self::History,
        Self::DebtSummary,
    ];

    /// Key used in the `?active=` query parameter
    pub fn key(&self) -> String {
        match self {
            Self::Dashboard => "d001_overview".to_string(),
            Self::Settlement => RecordReturn::full_name(),
            Self::OrderOut => IssueOrder::full_name(),
            Self::History => OrderHistory::full_name(),
            Self::DebtSummary => DebtOverview::full_name(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the active page from `?active=` and keep the URL in sync.
    pub fn init_url_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get("active").and_then(|k| Page::from_key(k)) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let key = this.active.get().key();
            let new_url = format!("?active={}", key);
            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(
                    &wasm_bindgen::JsValue::NULL,
                    "",
                    Some(&new_url),
                );
            }
        });
    }

    pub fn open(&self, page: Page) {
        log::debug!("open page: {}", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys() {
        assert_eq!(Page::from_key("u001_settlement"), Some(Page::Settlement));
        assert_eq!(Page::from_key("d001_overview"), Some(Page::Dashboard));
        assert_eq!(Page::from_key("u002_order_out"), Some(Page::OrderOut));
        assert_eq!(Page::from_key("a015_wb_orders"), None);
        for page in Page::ALL {
            assert_eq!(Page::from_key(&page.key()), Some(page));
        }
    }
}
