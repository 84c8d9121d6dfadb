//! # Session Statistics
//!
//! The summary shown when the operator stops the work timer.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Resumo da Sessão                         │
//! │  Tempo trabalhado        02:14:09         │
//! │  Vendas                  7                │
//! │  Itens vendidos          19               │
//! │  Faturamento             R$ 24.310,00     │
//! │  Custos                  R$ 9.870,00      │
//! │  Descontos               R$ 640,00        │
//! │  Lucro                   R$ 14.440,00     │
//! │  Ticket médio            R$ 3.472,86      │
//! └───────────────────────────────────────────┘
//! ```
//!
//! A plain fold over the ledger, recomputed on every request. Ledgers are
//! a handful of entries, so nothing is cached.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ledger::SaleLedger;
use crate::money::Money;
use crate::timer::format_elapsed;

/// Aggregates over every completed sale of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub sale_count: usize,
    pub items_sold: u64,
    /// Σ sale totals.
    pub revenue: Money,
    pub total_cost: Money,
    pub total_profit: Money,
    pub total_discount: Money,
    /// Time on the work timer when the summary was taken.
    pub elapsed_seconds: u64,
}

impl SessionSummary {
    /// Reduces `ledger` into a summary.
    pub fn from_ledger(ledger: &SaleLedger, elapsed_seconds: u64) -> Self {
        ledger.sales().iter().fold(
            SessionSummary {
                elapsed_seconds,
                ..SessionSummary::default()
            },
            |mut acc, sale| {
                acc.sale_count += 1;
                acc.items_sold += sale.items_sold();
                acc.revenue += sale.total;
                acc.total_cost += sale.total_cost;
                acc.total_profit += sale.profit;
                acc.total_discount += sale.discount_amount;
                acc
            },
        )
    }

    /// Revenue per sale, truncated to the centavo. Zero with no sales.
    pub fn average_ticket(&self) -> Money {
        if self.sale_count == 0 {
            Money::zero()
        } else {
            Money::from_cents(self.revenue.cents() / self.sale_count as i64)
        }
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::Catalog;
    use crate::types::DiscountRate;
    use chrono::Utc;

    #[test]
    fn test_empty_ledger() {
        let summary = SessionSummary::from_ledger(&SaleLedger::new(), 42);
        assert_eq!(summary.sale_count, 0);
        assert_eq!(summary.revenue, Money::zero());
        assert_eq!(summary.average_ticket(), Money::zero());
        assert_eq!(summary.elapsed_seconds, 42);
        assert_eq!(summary.elapsed_display(), "00:00:42");
    }

    #[test]
    fn test_sums_every_sale() {
        let catalog = Catalog::workshop().unwrap();
        let mut ledger = SaleLedger::new();

        let mut first = Cart::new();
        first.add_item(catalog.get("kit").unwrap());
        first.add_item(catalog.get("kit").unwrap());
        ledger.record(&first, DiscountRate::from_percentage(10.0), "1".into(), Utc::now());

        let mut second = Cart::new();
        second.add_item(catalog.get("pneu").unwrap());
        second.add_item(catalog.get("reparo-peca").unwrap());
        ledger.record(&second, DiscountRate::zero(), "2".into(), Utc::now());

        let summary = SessionSummary::from_ledger(&ledger, 3600);

        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.items_sold, 4);
        assert_eq!(summary.revenue, Money::from_reais(990 + 425));
        assert_eq!(summary.total_cost, Money::from_reais(450 + 170));
        assert_eq!(summary.total_discount, Money::from_reais(110));
        assert_eq!(summary.total_profit, Money::from_reais(540 + 255));
        assert_eq!(summary.total_profit, summary.revenue - summary.total_cost);
        assert_eq!(summary.average_ticket(), Money::from_cents(70_750));
    }
}
