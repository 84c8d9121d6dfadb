//! # Validation Module
//!
//! Input validation for the few places where text enters the system.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                     │
//! │  └── Disables actions that can't apply (empty cart, stopped timer)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Discount text → clamped DiscountRate                              │
//! │  ├── Search query length                                               │
//! │  └── Catalog table sanity (ids, names, prices)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  └── DiscountRate / quantity floors can't hold bad values              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountRate, UNITS_PER_PERCENT};
use crate::{DISCOUNT_DECIMALS, MAX_DISCOUNT_UNITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted search query, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog item id.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Lowercase letters, digits and hyphens only (`kit-freio`)
///
/// ## Example
/// ```rust
/// use oficina_core::validation::validate_item_id;
///
/// assert!(validate_item_id("kit-freio").is_ok());
/// assert!(validate_item_id("").is_err());
/// assert!(validate_item_id("Kit Freio").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 50,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only lowercase letters, digits, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name: non-empty, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a catalog amount (price or cost) is not negative.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Parses the discount field as typed by the operator.
///
/// The digits are read as an exact decimal, never through a float, so the
/// rate stored is the rate typed.
///
/// ## Rules
/// - Surrounding whitespace and a trailing `%` are ignored
/// - Empty input means no discount
/// - `,` is accepted as the decimal separator (`12,5`)
/// - At most [`DISCOUNT_DECIMALS`] digits after the separator
/// - Anything that isn't a plain decimal number is rejected
/// - Numbers outside `[0, 100]` are clamped, never stored as-is
///
/// ## User Workflow
/// ```text
/// Operator types "15"     ──► 15%
/// Operator types "33,333" ──► 33.333% (exact)
/// Operator types "250"    ──► 100% (clamped)
/// Operator types "-5"     ──► 0%   (clamped)
/// Operator types "abc"    ──► Error: discount has invalid format
/// ```
///
/// ## Example
/// ```rust
/// use oficina_core::validation::parse_discount_input;
///
/// assert_eq!(parse_discount_input("12,5").unwrap().units(), 125_000_000);
/// assert_eq!(parse_discount_input("").unwrap().units(), 0);
/// assert!(parse_discount_input("dez").is_err());
/// ```
pub fn parse_discount_input(input: &str) -> ValidationResult<DiscountRate> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    if trimmed.is_empty() {
        return Ok(DiscountRate::zero());
    }

    let normalized = trimmed.replace(',', ".");
    let (negative, digits) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.strip_prefix('+').unwrap_or(&normalized)),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
        return Err(ValidationError::InvalidFormat {
            field: "discount".to_string(),
            reason: "must be a number between 0 and 100".to_string(),
        });
    }
    if frac.len() > DISCOUNT_DECIMALS as usize {
        return Err(ValidationError::InvalidFormat {
            field: "discount".to_string(),
            reason: format!("at most {} decimal places", DISCOUNT_DECIMALS),
        });
    }

    if negative {
        return Ok(DiscountRate::zero());
    }

    let whole = whole.trim_start_matches('0');
    if whole.len() > 3 {
        return Ok(DiscountRate::full());
    }
    let whole_units = whole.parse::<u64>().unwrap_or(0) * UNITS_PER_PERCENT as u64;
    let frac_units = format!("{:0<width$}", frac, width = DISCOUNT_DECIMALS as usize)
        .parse::<u64>()
        .unwrap_or(0);

    let units = (whole_units + frac_units).min(MAX_DISCOUNT_UNITS as u64);
    Ok(DiscountRate::from_units(units as u32))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("kit").is_ok());
        assert!(validate_item_id("chave-inglesa").is_ok());
        assert!(validate_item_id("kit2").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id("pé-de-cabra").is_err());
        assert!(validate_item_id("KIT").is_err());
        assert!(validate_item_id(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Elevador Hidráulico").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  freio ").unwrap(), "freio");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("price", Money::zero()).is_ok());
        assert!(validate_amount("price", Money::from_reais(550)).is_ok());
        assert!(validate_amount("cost", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_parse_discount_input() {
        assert_eq!(parse_discount_input("10").unwrap().units(), 100_000_000);
        assert_eq!(parse_discount_input(" 10% ").unwrap().units(), 100_000_000);
        assert_eq!(parse_discount_input("12.5").unwrap().units(), 125_000_000);
        assert_eq!(parse_discount_input("12,5").unwrap().units(), 125_000_000);
        assert_eq!(parse_discount_input(".5").unwrap().units(), 5_000_000);
        assert_eq!(parse_discount_input("+7.").unwrap().units(), 70_000_000);
        assert_eq!(parse_discount_input("").unwrap().units(), 0);
    }

    #[test]
    fn test_parse_discount_input_is_exact() {
        assert_eq!(parse_discount_input("33.333").unwrap().units(), 333_330_000);
        assert_eq!(parse_discount_input("0,0000001").unwrap().units(), 1);
        assert_eq!(parse_discount_input("99.9999999").unwrap().units(), 999_999_999);
        assert!(parse_discount_input("1.00000001").is_err());
    }

    #[test]
    fn test_parse_discount_input_clamps() {
        assert_eq!(parse_discount_input("250").unwrap(), DiscountRate::full());
        assert_eq!(parse_discount_input("-5").unwrap(), DiscountRate::zero());
        assert_eq!(parse_discount_input("100.5").unwrap(), DiscountRate::full());
        assert_eq!(parse_discount_input("000100").unwrap(), DiscountRate::full());
        assert_eq!(parse_discount_input("123456789012345678901234").unwrap(), DiscountRate::full());
    }

    #[test]
    fn test_parse_discount_input_rejects_garbage() {
        assert!(parse_discount_input("dez").is_err());
        assert!(parse_discount_input("1,2,3").is_err());
        assert!(parse_discount_input("NaN").is_err());
        assert!(parse_discount_input("inf").is_err());
        assert!(parse_discount_input("1e2").is_err());
        assert!(parse_discount_input("-").is_err());
        assert!(parse_discount_input(".").is_err());
    }
}
