//! # Catalog
//!
//! The workshop price list. Built once at startup, read-only afterwards.
//!
//! ## Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ Todos (10) ] [ ferramentas (6) ] [ peças (3) ] [ serviços (1) ]     │
//! │                                                                         │
//! │  Search: "freio"                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fold("Kit de Reposição de Freio") contains fold("freio")  ──► match   │
//! │                                                                         │
//! │  Folding lowercases and strips Portuguese accents, so "reposicao"      │
//! │  finds "Reposição" and "PE DE CABRA" finds "Pé de Cabra".              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CatalogItem, Category, ExternalFee, Notice, NoticeLevel};
use crate::validation::{validate_amount, validate_item_id, validate_item_name, validate_search_query};

// =============================================================================
// Category Filter
// =============================================================================

/// The category tab currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind", content = "category")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether an item shows up under this tab.
    #[inline]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("todos"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "todos" | "tudo" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The fixed list of sellable items plus the reference data shown with it.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    external_fees: Vec<ExternalFee>,
    notices: Vec<Notice>,
}

impl Catalog {
    /// Builds a catalog from a table of items.
    ///
    /// ## Errors
    /// - an id is malformed or appears twice
    /// - a name is empty
    /// - a price or cost is negative
    pub fn new(items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());

        for item in &items {
            validate_item_id(&item.id)?;
            validate_item_name(&item.name)?;
            validate_amount("price", item.price)?;
            validate_amount("cost", item.cost)?;

            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: item.id.clone(),
                }
                .into());
            }
        }

        Ok(Catalog {
            items,
            external_fees: Vec::new(),
            notices: Vec::new(),
        })
    }

    /// Attaches the call-out fee table.
    pub fn with_external_fees(mut self, fees: Vec<ExternalFee>) -> Self {
        self.external_fees = fees;
        self
    }

    /// Attaches the counter notices.
    pub fn with_notices(mut self, notices: Vec<Notice>) -> Self {
        self.notices = notices;
        self
    }

    /// The Blackouts Mecânica price list, with its call-out fees and notices.
    pub fn workshop() -> CoreResult<Self> {
        let items = vec![
            CatalogItem::new("kit", "Kit", 225, 550, Category::Tool),
            CatalogItem::new("pneu", "Pneu", 110, 275, Category::Part),
            CatalogItem::new("pe-cabra", "Pé de Cabra", 400, 975, Category::Tool),
            CatalogItem::new("chave-inglesa", "Chave Inglesa", 400, 975, Category::Tool),
            CatalogItem::new("elevador", "Elevador Hidráulico", 400, 975, Category::Tool),
            CatalogItem::new("kit-freio", "Kit de Reposição de Freio", 225, 550, Category::Part),
            CatalogItem::new("bolsa", "Bolsa Mecânica", 7500, 18_000, Category::Tool),
            CatalogItem::new("guincho", "Guincho Portátil", 3300, 8000, Category::Tool),
            CatalogItem::new("kit-vidros", "Kit de Vidros", 250, 600, Category::Part),
            CatalogItem::new("reparo-peca", "Reparo de Peça", 60, 150, Category::Service),
        ];

        let fees = vec![
            ExternalFee {
                name: "Chamado Externo".to_string(),
                base_price: Money::from_reais(1500),
            },
            ExternalFee {
                name: "Veículos Explodidos/Naufragados".to_string(),
                base_price: Money::from_reais(1500),
            },
        ];

        let notices = vec![
            Notice {
                level: NoticeLevel::Warning,
                text: "É PROIBIDO A REVENDA DE KIT VIDROS. Compras devem ser feitas diretamente na bancada pública.".to_string(),
            },
            Notice {
                level: NoticeLevel::Info,
                text: "É permitido pedir gorjetas e dar descontos esporadicamente. Os valores da tabela não podem ser alterados.".to_string(),
            },
            Notice {
                level: NoticeLevel::Info,
                text: "O valor de chamados externos pode variar conforme a distância.".to_string(),
            },
        ];

        Ok(Catalog::new(items)?
            .with_external_fees(fees)
            .with_notices(notices))
    }

    /// All items, in price-list order.
    #[inline]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks an item up by id.
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Like [`Catalog::get`], but an unknown id is an error.
    pub fn require(&self, id: &str) -> CoreResult<&CatalogItem> {
        self.get(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    /// Items under a category tab.
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&CatalogItem> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }

    /// Number of items under a category tab.
    pub fn count(&self, filter: CategoryFilter) -> usize {
        self.items.iter().filter(|item| filter.matches(item)).count()
    }

    /// Name search combined with a category tab.
    ///
    /// An empty query returns the whole tab.
    pub fn search(&self, query: &str, filter: CategoryFilter) -> CoreResult<Vec<&CatalogItem>> {
        let query = validate_search_query(query)?;
        let needle = fold(&query);

        Ok(self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .filter(|item| needle.is_empty() || fold(&item.name).contains(&needle))
            .collect())
    }

    pub fn external_fees(&self) -> &[ExternalFee] {
        &self.external_fees
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Lowercases and strips the accents used in Portuguese.
fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn test_workshop_catalog_is_valid() {
        let catalog = Catalog::workshop().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.external_fees().len(), 2);
        assert_eq!(catalog.external_fees()[0].base_price, Money::from_reais(1500));
        assert_eq!(catalog.notices().len(), 3);
        assert_eq!(catalog.notices()[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_builders_attach_fees_and_notices() {
        let catalog = Catalog::new(vec![CatalogItem::new("kit", "Kit", 1, 2, Category::Tool)])
            .unwrap()
            .with_external_fees(vec![ExternalFee {
                name: "Chamado".to_string(),
                base_price: Money::from_reais(100),
            }])
            .with_notices(vec![Notice {
                level: NoticeLevel::Info,
                text: "Aberto".to_string(),
            }]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.external_fees()[0].name, "Chamado");
        assert_eq!(catalog.notices()[0].text, "Aberto");

        let bare = Catalog::new(Vec::new()).unwrap();
        assert!(bare.is_empty());
        assert!(bare.external_fees().is_empty());
        assert!(bare.notices().is_empty());
    }

    #[test]
    fn test_get_and_require() {
        let catalog = Catalog::workshop().unwrap();
        let kit = catalog.get("kit").unwrap();
        assert_eq!(kit.price, Money::from_reais(550));
        assert_eq!(kit.cost, Money::from_reais(225));

        assert!(catalog.get("macaco").is_none());
        assert!(matches!(
            catalog.require("macaco"),
            Err(CoreError::ItemNotFound(id)) if id == "macaco"
        ));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let items = vec![
            CatalogItem::new("kit", "Kit", 1, 2, Category::Tool),
            CatalogItem::new("kit", "Outro Kit", 1, 2, Category::Tool),
        ];
        assert!(matches!(
            Catalog::new(items),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_new_rejects_negative_price() {
        let mut item = CatalogItem::new("kit", "Kit", 1, 2, Category::Tool);
        item.price = Money::from_cents(-1);
        assert!(Catalog::new(vec![item]).is_err());
    }

    #[test]
    fn test_filter_and_counts() {
        let catalog = Catalog::workshop().unwrap();
        assert_eq!(catalog.count(CategoryFilter::All), 10);
        assert_eq!(catalog.count(Category::Tool.into()), 6);
        assert_eq!(catalog.count(Category::Part.into()), 3);
        assert_eq!(catalog.count(Category::Service.into()), 1);

        let services = catalog.filter(Category::Service.into());
        assert_eq!(ids(&services), vec!["reparo-peca"]);
    }

    #[test]
    fn test_search_is_case_and_accent_insensitive() {
        let catalog = Catalog::workshop().unwrap();

        let hits = catalog.search("reposicao", CategoryFilter::All).unwrap();
        assert_eq!(ids(&hits), vec!["kit-freio"]);

        let hits = catalog.search("PE DE CABRA", CategoryFilter::All).unwrap();
        assert_eq!(ids(&hits), vec!["pe-cabra"]);
    }

    #[test]
    fn test_search_combines_with_category() {
        let catalog = Catalog::workshop().unwrap();

        let all_kits = catalog.search("kit", CategoryFilter::All).unwrap();
        assert_eq!(ids(&all_kits), vec!["kit", "kit-freio", "kit-vidros"]);

        let part_kits = catalog.search("kit", Category::Part.into()).unwrap();
        assert_eq!(ids(&part_kits), vec!["kit-freio", "kit-vidros"]);
    }

    #[test]
    fn test_empty_search_returns_tab() {
        let catalog = Catalog::workshop().unwrap();
        assert_eq!(catalog.search("   ", CategoryFilter::All).unwrap().len(), 10);
        assert!(catalog.search(&"x".repeat(101), CategoryFilter::All).is_err());
    }

    #[test]
    fn test_category_filter_from_str() {
        assert_eq!("todos".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "peças".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Part)
        );
        assert!("comida".parse::<CategoryFilter>().is_err());
    }
}
