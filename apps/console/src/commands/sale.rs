//! # Sale Commands

use oficina_core::{CompletedSale, Money, SessionSnapshot, SessionSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::CommandResponse;
use crate::state::SessionState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    /// The booked sale, or `None` if completing wasn't allowed.
    pub sale: Option<CompletedSale>,
    pub session: SessionSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub sales: Vec<CompletedSale>,
    pub summary: SessionSummary,
    pub average_ticket: Money,
}

/// Books the cart as a sale and opens its confirmation.
///
/// Allowed only with a running timer and a non-empty cart.
pub fn complete_sale(session: &SessionState) -> SaleResponse {
    debug!("complete_sale command");

    session.with_session_mut(|s| {
        let sale = s.complete_sale().cloned();
        if let Some(sale) = &sale {
            info!(
                sale_id = %sale.id,
                number = sale.number,
                total = %sale.total,
                profit = %sale.profit,
                "Sale completed"
            );
        }
        SaleResponse {
            sale,
            session: s.snapshot(),
        }
    })
}

/// Closes the confirmation; cart and discount are cleared for the next
/// customer.
pub fn acknowledge_sale(session: &SessionState) -> CommandResponse {
    debug!("acknowledge_sale command");

    session.with_session_mut(|s| {
        let applied = s.acknowledge_sale();
        CommandResponse::new(applied, s)
    })
}

/// Sales booked so far this session, with running totals.
pub fn get_history(session: &SessionState) -> HistoryResponse {
    debug!("get_history command");

    session.with_session(|s| {
        let summary = s.summary();
        HistoryResponse {
            sales: s.ledger().sales().to_vec(),
            average_ticket: summary.average_ticket(),
            summary,
        }
    })
}
