//! Main-category list and current selection.

use std::sync::Arc;

use riverchart_domain::{PageRequest, extract_records};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::api::{CategoryApi, CategoryLevel};

#[derive(Debug, Default)]
struct CategoryState {
    main: Vec<Value>,
    current_main: Option<Value>,
    current_sub: Option<Value>,
}

/// Caches the main-category list and the user's current selection.
#[derive(Clone)]
pub struct CategoryCache {
    api: CategoryApi,
    page_size: u32,
    state: Arc<RwLock<CategoryState>>,
}

impl CategoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(api: CategoryApi, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            state: Arc::new(RwLock::new(CategoryState::default())),
        }
    }

    /// Returns the main categories, fetching them when the cache is empty
    /// or `refresh` is set. A failed fetch is logged and yields an empty
    /// list; the cached list is kept.
    pub async fn load_main_categories(&self, refresh: bool) -> Vec<Value> {
        {
            let state = self.state.read().await;
            if !state.main.is_empty() && !refresh {
                return state.main.clone();
            }
        }

        match self
            .api
            .page(CategoryLevel::Main, &PageRequest::first(self.page_size))
            .await
        {
            Ok(payload) => {
                let categories = extract_records(&payload);
                debug!(count = categories.len(), "main categories loaded");
                self.state.write().await.main.clone_from(&categories);
                categories
            }
            Err(err) => {
                error!(error = %err, "loading main categories failed");
                Vec::new()
            }
        }
    }

    /// The cached main categories.
    pub async fn main_categories(&self) -> Vec<Value> {
        self.state.read().await.main.clone()
    }

    /// Selects a main category.
    pub async fn set_current_main(&self, category: Value) {
        self.state.write().await.current_main = Some(category);
    }

    /// Selects a sub-category.
    pub async fn set_current_sub(&self, category: Value) {
        self.state.write().await.current_sub = Some(category);
    }

    /// The selected main category.
    pub async fn current_main(&self) -> Option<Value> {
        self.state.read().await.current_main.clone()
    }

    /// The selected sub-category.
    pub async fn current_sub(&self) -> Option<Value> {
        self.state.read().await.current_sub.clone()
    }

    /// Clears both selections.
    pub async fn clear_current(&self) {
        let mut state = self.state.write().await;
        state.current_main = None;
        state.current_sub = None;
    }
}
