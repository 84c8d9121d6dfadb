//! # Domain Types
//!
//! Core domain types used throughout the workshop counter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │    Category     │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (slug)      │   │  Tool           │   │  units (u32)    │       │
//! │  │  name           │   │  Part           │   │  10⁻⁷ % each    │       │
//! │  │  cost           │   │  Service        │   │  ≤ 100%         │       │
//! │  │  price          │   └─────────────────┘   └─────────────────┘       │
//! │  │  category       │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │  ExternalFee    │   │     Notice      │       │
//! │                        │  (info only)    │   │  (info only)    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{DISCOUNT_DECIMALS, MAX_DISCOUNT_UNITS};

// =============================================================================
// Category
// =============================================================================

/// What kind of thing a catalog item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Tools and equipment (ferramentas).
    Tool,
    /// Replacement parts (peças).
    Part,
    /// Labour (serviços).
    Service,
}

impl Category {
    /// Every category, in tab order.
    pub const ALL: [Category; 3] = [Category::Tool, Category::Part, Category::Service];

    /// Label shown on the badge and the category tab.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Tool => "ferramentas",
            Category::Part => "peças",
            Category::Service => "serviços",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tool" | "tools" | "ferramenta" | "ferramentas" => Ok(Category::Tool),
            "part" | "parts" | "peça" | "peças" | "peca" | "pecas" => Ok(Category::Part),
            "service" | "services" | "serviço" | "serviços" | "servico" | "servicos" => {
                Ok(Category::Service)
            }
            _ => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", s.trim()),
            }),
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An entry on the workshop price list.
///
/// Defined once at startup and never changed; the cart holds copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Stable slug, unique within the catalog (e.g. `kit-freio`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Internal cost to the workshop (for profit).
    pub cost: Money,

    /// Price charged to the customer.
    pub price: Money,

    pub category: Category,
}

impl CatalogItem {
    /// Builds an item from whole-reais price and cost.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost_reais: i64,
        price_reais: i64,
        category: Category,
    ) -> Self {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            cost: Money::from_reais(cost_reais),
            price: Money::from_reais(price_reais),
            category,
        }
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage discount, held as an exact decimal with up to
/// [`DISCOUNT_DECIMALS`] fractional digits of a percent.
///
/// The stored unit is 10⁻⁷ %, so `10%` is `100_000_000` and `33.333%` is
/// `333_330_000`. Nothing the operator can type at that precision is
/// rounded on the way in; only the final discount amount is rounded to
/// the centavo.
///
/// ## Invariant
/// Always within `0..=MAX_DISCOUNT_UNITS` (100%). Every constructor clamps,
/// so an out-of-range discount can never be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

/// Stored units in one whole percent.
pub(crate) const UNITS_PER_PERCENT: u32 = 10_u32.pow(DISCOUNT_DECIMALS);

impl DiscountRate {
    /// Creates a rate from stored units (10⁻⁷ %), clamped to 100%.
    #[inline]
    pub const fn from_units(units: u32) -> Self {
        if units > MAX_DISCOUNT_UNITS {
            DiscountRate(MAX_DISCOUNT_UNITS)
        } else {
            DiscountRate(units)
        }
    }

    /// Creates a rate from a percentage, clamped to `[0, 100]`.
    ///
    /// NaN counts as no discount. Digits past the seventh decimal are
    /// rounded off, since an `f64` carries no exact decimal anyway; text
    /// input goes through [`crate::validation::parse_discount_input`].
    ///
    /// ## Example
    /// ```rust
    /// use oficina_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percentage(12.5).units(), 125_000_000);
    /// assert_eq!(DiscountRate::from_percentage(150.0), DiscountRate::full());
    /// assert_eq!(DiscountRate::from_percentage(-3.0), DiscountRate::zero());
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        if pct.is_nan() {
            return DiscountRate::zero();
        }
        let units = (pct.clamp(0.0, 100.0) * UNITS_PER_PERCENT as f64).round() as u32;
        DiscountRate::from_units(units)
    }

    /// Returns the rate in stored units (10⁻⁷ %).
    #[inline]
    pub const fn units(&self) -> u32 {
        self.0
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// 100% off.
    #[inline]
    pub const fn full() -> Self {
        DiscountRate(MAX_DISCOUNT_UNITS)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Whole percentages print bare (`10%`); anything else to two decimals
/// (`33.33%`).
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % UNITS_PER_PERCENT == 0 {
            write!(f, "{}%", self.0 / UNITS_PER_PERCENT)
        } else {
            let hundredths = (self.0 + UNITS_PER_PERCENT / 200) / (UNITS_PER_PERCENT / 100);
            write!(f, "{}.{:02}%", hundredths / 100, hundredths % 100)
        }
    }
}

// =============================================================================
// Reference Data
// =============================================================================

/// A call-out fee charged on top of the services performed.
///
/// Shown next to the catalog for reference; it is not a cart item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExternalFee {
    pub name: String,
    /// Base fee before services are added.
    pub base_price: Money,
}

/// Severity of a counter notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Info,
}

/// A standing rule displayed to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
