//! # Catalog Commands
//!
//! The price list as the operator browses it: one tab per category plus
//! "todos", an optional name search, and the reference data (external
//! call-out fees, standing notices) shown beside it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [todos 10] [ferramentas 6] [peças 3] [serviços 1]     busca: "kit"    │
//! │                                                                         │
//! │  kit          Kit                         R$ 550,00    ×2 no carrinho  │
//! │  kit-freio    Kit de Reposição de Freio   R$ 550,00                    │
//! │  kit-vidros   Kit de Vidros               R$ 600,00                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use oficina_core::{Catalog, CatalogItem, Category, CategoryFilter, ExternalFee, Notice, Session};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;

/// One row of the catalog view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub item: CatalogItem,
    /// Units of this item currently in the cart (0 if none).
    pub in_cart: u32,
}

/// A category tab with its item count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTab {
    pub filter: CategoryFilter,
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

/// Catalog view: rows, tabs and reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub filter: CategoryFilter,
    pub query: String,
    pub entries: Vec<CatalogEntry>,
    pub tabs: Vec<CategoryTab>,
    pub external_fees: Vec<ExternalFee>,
    pub notices: Vec<Notice>,
}

impl CatalogResponse {
    fn build(session: &Session, items: Vec<&CatalogItem>, filter: CategoryFilter, query: String) -> Self {
        let catalog = session.catalog();
        let entries = items
            .into_iter()
            .map(|item| CatalogEntry {
                in_cart: session.cart().quantity_of(&item.id),
                item: item.clone(),
            })
            .collect();

        CatalogResponse {
            filter,
            query,
            entries,
            tabs: tabs(catalog, filter),
            external_fees: catalog.external_fees().to_vec(),
            notices: catalog.notices().to_vec(),
        }
    }
}

fn tabs(catalog: &Catalog, selected: CategoryFilter) -> Vec<CategoryTab> {
    std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
        .map(|filter| CategoryTab {
            filter,
            label: filter.to_string(),
            count: catalog.count(filter),
            selected: filter == selected,
        })
        .collect()
}

/// Lists the catalog under a category tab (default: all).
pub fn list_catalog(session: &SessionState, filter: Option<CategoryFilter>) -> CatalogResponse {
    let filter = filter.unwrap_or_default();
    debug!(%filter, "list_catalog command");

    session.with_session(|s| {
        let items = s.catalog().filter(filter);
        CatalogResponse::build(s, items, filter, String::new())
    })
}

/// Searches item names within a category tab.
///
/// ## Matching
/// Case- and accent-insensitive substring: "pe de" finds "Pé de Cabra".
///
/// ## Errors
/// A query over 100 characters is a validation error.
pub fn search_catalog(
    session: &SessionState,
    query: &str,
    filter: Option<CategoryFilter>,
) -> Result<CatalogResponse, ApiError> {
    let filter = filter.unwrap_or_default();
    debug!(query = %query, %filter, "search_catalog command");

    session.with_session(|s| -> Result<CatalogResponse, ApiError> {
        let items = s.catalog().search(query, filter)?;
        Ok(CatalogResponse::build(s, items, filter, query.trim().to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::time::Duration;

    fn state() -> SessionState {
        SessionState::new(Session::new(Catalog::workshop().unwrap()), Duration::from_secs(1))
    }

    #[test]
    fn test_list_all_has_every_item_and_tab_counts() {
        let response = list_catalog(&state(), None);
        assert_eq!(response.entries.len(), 10);
        assert_eq!(response.tabs.len(), 4);
        assert!(response.tabs[0].selected);
        assert_eq!(response.tabs[0].count, 10);
        let tab_total: usize = response.tabs[1..].iter().map(|t| t.count).sum();
        assert_eq!(tab_total, 10);
        assert_eq!(response.external_fees.len(), 2);
        assert_eq!(response.notices.len(), 3);
    }

    #[test]
    fn test_list_by_category() {
        let response = list_catalog(&state(), Some(CategoryFilter::Only(Category::Service)));
        assert_eq!(response.entries.len(), 1);
        assert_eq!(response.entries[0].item.id, "reparo-peca");
        assert!(response.tabs[3].selected);
    }

    #[test]
    fn test_entries_show_cart_quantity() {
        let state = state();
        state.with_session_mut(|s| s.add_item("pneu")).unwrap();
        state.with_session_mut(|s| s.add_item("pneu")).unwrap();

        let response = list_catalog(&state, None);
        let pneu = response.entries.iter().find(|e| e.item.id == "pneu").unwrap();
        assert_eq!(pneu.in_cart, 2);
        let kit = response.entries.iter().find(|e| e.item.id == "kit").unwrap();
        assert_eq!(kit.in_cart, 0);
    }

    #[test]
    fn test_search_ignores_accents() {
        let response = search_catalog(&state(), "  pe de  ", None).unwrap();
        assert_eq!(response.query, "pe de");
        assert_eq!(response.entries.len(), 1);
        assert_eq!(response.entries[0].item.name, "Pé de Cabra");
    }

    #[test]
    fn test_search_rejects_long_query() {
        let err = search_catalog(&state(), &"a".repeat(101), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
