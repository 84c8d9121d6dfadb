//! # Terminal Front End
//!
//! A line-oriented counter: the operator types an intent, the console runs
//! the matching command and prints the view it leads to.
//!
//! ## Intents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalogo [categoria]   price list (todos|ferramentas|peças|serviços)   │
//! │  buscar <texto>         name search                                     │
//! │  add <id>               one unit into the cart                          │
//! │  mais <id> / + <id>     quantity +1                                     │
//! │  menos <id> / - <id>    quantity -1 (never below 1)                     │
//! │  rm <id>                drop the line                                   │
//! │  desconto <pct>         discount, 0-100 ("12,5" accepted)               │
//! │  limpar                 empty cart, discount back to 0                  │
//! │  carrinho               cart and totals                                 │
//! │  iniciar / pausar       work timer                                      │
//! │  parar                  stop timer, show the session summary            │
//! │  vender                 book the cart as a sale                         │
//! │  ok                     close the confirmation or summary               │
//! │  historico              sales so far                                    │
//! │  zerar                  wipe the session                                │
//! │  sair                   quit                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! English aliases (`add`, `remove`, `discount`, `start`, `sell`, ...) work
//! too.

use std::str::FromStr;

use chrono::Local;
use oficina_core::timer::format_elapsed;
use oficina_core::{
    CatalogItem, CategoryFilter, CompletedSale, NoticeLevel, SessionSnapshot, SessionSummary,
    TimerState, View,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::commands::catalog::CatalogResponse;
use crate::commands::sale::HistoryResponse;
use crate::commands::config::get_config;
use crate::commands::{cart, catalog, sale, timer, CommandResponse};
use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

// =============================================================================
// Intent
// =============================================================================

/// One line of operator input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Help,
    Catalog(CategoryFilter),
    Search(String),
    Add(String),
    More(String),
    Less(String),
    Remove(String),
    Discount(String),
    Clear,
    Cart,
    Start,
    Pause,
    Stop,
    Sell,
    Acknowledge,
    History,
    Reset,
    Quit,
}

impl FromStr for Intent {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let intent = match word.to_lowercase().as_str() {
            "ajuda" | "help" | "?" => Intent::Help,
            "catalogo" | "catálogo" | "catalog" | "ls" => Intent::Catalog(rest.parse()?),
            "buscar" | "busca" | "search" => Intent::Search(rest.to_string()),
            "add" | "adicionar" => Intent::Add(item_arg(word, rest)?),
            "mais" | "+" => Intent::More(item_arg(word, rest)?),
            "menos" | "-" => Intent::Less(item_arg(word, rest)?),
            "rm" | "remover" | "remove" => Intent::Remove(item_arg(word, rest)?),
            "desconto" | "discount" => Intent::Discount(rest.to_string()),
            "limpar" | "clear" => Intent::Clear,
            "carrinho" | "cart" => Intent::Cart,
            "iniciar" | "start" => Intent::Start,
            "pausar" | "pause" => Intent::Pause,
            "parar" | "stop" => Intent::Stop,
            "vender" | "sell" => Intent::Sell,
            "ok" => Intent::Acknowledge,
            "historico" | "histórico" | "history" => Intent::History,
            "zerar" | "reset" => Intent::Reset,
            "sair" | "quit" | "exit" => Intent::Quit,
            _ => {
                return Err(ApiError::validation(format!(
                    "Comando desconhecido: '{}' (digite 'ajuda')",
                    word
                )))
            }
        };

        Ok(intent)
    }
}

fn item_arg(word: &str, rest: &str) -> Result<String, ApiError> {
    if rest.is_empty() {
        Err(ApiError::validation(format!("Uso: {} <id>", word)))
    } else {
        Ok(rest.to_lowercase())
    }
}

// =============================================================================
// Loop
// =============================================================================

/// Reads intents from `reader` until `sair` or end of input, writing every
/// view to `writer`.
///
/// Command errors (unknown id, bad discount) are printed and the loop goes
/// on; only I/O failures end it early.
pub async fn run<R, W>(
    session: &SessionState,
    config: &ConfigState,
    reader: R,
    writer: &mut W,
) -> Result<(), ApiError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut console = Console::new(session, config);

    writer.write_all(console.banner().as_bytes()).await?;

    loop {
        writer.write_all(console.prompt().as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let output = match line.parse::<Intent>() {
            Ok(Intent::Quit) => break,
            Ok(intent) => console.handle(intent),
            Err(err) => Err(err),
        };

        let text = output.unwrap_or_else(|err| {
            warn!(code = ?err.code, message = %err.message, "Command failed");
            format!("Erro: {}\n", err.message)
        });
        writer.write_all(text.as_bytes()).await?;
    }

    writer.write_all("Até logo.\n".as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

// =============================================================================
// Console
// =============================================================================

/// Dispatches intents to commands and renders their results.
pub struct Console<'a> {
    session: &'a SessionState,
    config: ConfigState,
    /// Tab the catalog view was last shown with.
    filter: CategoryFilter,
}

impl<'a> Console<'a> {
    pub fn new(session: &'a SessionState, config: &ConfigState) -> Self {
        Console {
            session,
            config: get_config(config),
            filter: CategoryFilter::All,
        }
    }

    pub fn banner(&self) -> String {
        let response = catalog::list_catalog(self.session, Some(self.filter));
        format!(
            "=== {} ===\n{}\nDigite 'ajuda' para ver os comandos.\n",
            self.config.shop_name,
            self.render_catalog(&response)
        )
    }

    /// `[00:12:09 rodando | 2 itens | R$ 1.100,00] > `
    pub fn prompt(&self) -> String {
        let snapshot = cart::get_session(self.session);
        let units: u64 = snapshot.cart.iter().map(|line| line.quantity as u64).sum();
        format!(
            "[{} {} | {} itens | {}] > ",
            format_elapsed(snapshot.elapsed_seconds),
            timer_label(snapshot.timer_state),
            units,
            self.money(snapshot.pricing.total.cents())
        )
    }

    /// Runs one intent and returns the text to show.
    pub fn handle(&mut self, intent: Intent) -> Result<String, ApiError> {
        debug!(?intent, "Handling intent");

        let text = match intent {
            Intent::Help => HELP.to_string(),
            Intent::Catalog(filter) => {
                self.filter = filter;
                self.render_catalog(&catalog::list_catalog(self.session, Some(filter)))
            }
            Intent::Search(query) => {
                let response = catalog::search_catalog(self.session, &query, Some(self.filter))?;
                self.render_catalog(&response)
            }
            Intent::Add(id) => self.after_cart(cart::add_to_cart(self.session, &id)?),
            Intent::More(id) => self.after_cart(cart::change_quantity(self.session, &id, 1)),
            Intent::Less(id) => self.after_cart(cart::change_quantity(self.session, &id, -1)),
            Intent::Remove(id) => self.after_cart(cart::remove_from_cart(self.session, &id)),
            Intent::Discount(input) => self.after_cart(cart::set_discount(self.session, &input)?),
            Intent::Clear => self.after_cart(cart::clear_cart(self.session)),
            Intent::Cart => self.render_cart(&cart::get_session(self.session)),
            Intent::Start => self.after_timer(timer::start_timer(self.session), "Cronômetro rodando."),
            Intent::Pause => self.after_timer(timer::pause_timer(self.session), "Cronômetro pausado."),
            Intent::Stop => {
                let response = timer::stop_timer(self.session);
                match response.summary {
                    Some(summary) => self.render_summary(&summary),
                    None => unavailable(&response.session, "parar"),
                }
            }
            Intent::Sell => {
                let response = sale::complete_sale(self.session);
                match &response.sale {
                    Some(sale) => self.render_confirmation(sale),
                    None => unavailable(&response.session, "vender"),
                }
            }
            Intent::Acknowledge => self.acknowledge(),
            Intent::History => self.render_history(&sale::get_history(self.session)),
            Intent::Reset => {
                timer::reset_session(self.session);
                "Sessão zerada.\n".to_string()
            }
            Intent::Quit => String::new(),
        };

        Ok(text)
    }

    fn acknowledge(&self) -> String {
        let snapshot = cart::get_session(self.session);
        match snapshot.view {
            View::ConfirmingSale { .. } => {
                sale::acknowledge_sale(self.session);
                "Pronto para o próximo cliente.\n".to_string()
            }
            View::ShowingSummary { .. } => {
                timer::acknowledge_summary(self.session);
                "Sessão encerrada. Cronômetro zerado.\n".to_string()
            }
            View::Browsing => "Nada para confirmar.\n".to_string(),
        }
    }

    fn after_cart(&self, response: CommandResponse) -> String {
        if response.applied {
            self.render_cart(&response.session)
        } else if response.session.view.is_modal() {
            modal_hint(&response.session.view)
        } else {
            "Nada mudou.\n".to_string()
        }
    }

    fn after_timer(&self, response: CommandResponse, done: &str) -> String {
        if response.applied {
            format!("{}\n", done)
        } else if response.session.view.is_modal() {
            modal_hint(&response.session.view)
        } else {
            format!(
                "Cronômetro já está {}.\n",
                timer_label(response.session.timer_state)
            )
        }
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    fn money(&self, cents: i64) -> String {
        self.config.format_currency(cents)
    }

    fn render_catalog(&self, response: &CatalogResponse) -> String {
        let mut lines = Vec::new();

        let tabs: Vec<String> = response
            .tabs
            .iter()
            .map(|tab| {
                if tab.selected {
                    format!("[{} {}]", tab.label, tab.count)
                } else {
                    format!(" {} {} ", tab.label, tab.count)
                }
            })
            .collect();
        lines.push(tabs.join(" "));
        if !response.query.is_empty() {
            lines.push(format!("busca: \"{}\"", response.query));
        }

        if response.entries.is_empty() {
            lines.push("  (nenhum item)".to_string());
        }
        for entry in &response.entries {
            let mut line = self.item_row(&entry.item);
            if entry.in_cart > 0 {
                line.push_str(&format!("  ×{} no carrinho", entry.in_cart));
            }
            lines.push(line);
        }

        if !response.external_fees.is_empty() {
            lines.push("Taxas externas:".to_string());
            for fee in &response.external_fees {
                lines.push(format!(
                    "  {:<34} a partir de {}",
                    fee.name,
                    self.money(fee.base_price.cents())
                ));
            }
        }
        for notice in &response.notices {
            let tag = match notice.level {
                NoticeLevel::Warning => "!",
                NoticeLevel::Info => "i",
            };
            lines.push(format!("({}) {}", tag, notice.text));
        }

        lines.join("\n") + "\n"
    }

    fn item_row(&self, item: &CatalogItem) -> String {
        format!(
            "  {:<14} {:<28} {:>14}  {}",
            item.id,
            item.name,
            self.money(item.price.cents()),
            item.category
        )
    }

    fn render_cart(&self, snapshot: &SessionSnapshot) -> String {
        if snapshot.cart.is_empty() {
            return "Carrinho vazio.\n".to_string();
        }

        let mut lines = vec!["Carrinho:".to_string()];
        for line in &snapshot.cart {
            lines.push(format!(
                "  {:<14} {:<28} x{:<4} {:>14}",
                line.item.id,
                line.item.name,
                line.quantity,
                self.money(line.line_total().cents())
            ));
        }

        let pricing = &snapshot.pricing;
        lines.push(format!("  {:<20} {:>14}", "Subtotal", self.money(pricing.subtotal.cents())));
        if !pricing.discount_rate.is_zero() {
            lines.push(format!(
                "  {:<20} {:>14}",
                format!("Desconto ({})", pricing.discount_rate),
                self.money(-pricing.discount_amount.cents())
            ));
        }
        lines.push(format!("  {:<20} {:>14}", "Total", self.money(pricing.total.cents())));
        lines.push(format!("  {:<20} {:>14}", "Custo", self.money(pricing.total_cost.cents())));
        lines.push(format!("  {:<20} {:>14}", "Lucro", self.money(pricing.profit.cents())));

        if !snapshot.can_complete_sale && snapshot.timer_state != TimerState::Running {
            lines.push("  (inicie o cronômetro para vender)".to_string());
        }

        lines.join("\n") + "\n"
    }

    fn render_confirmation(&self, sale: &CompletedSale) -> String {
        let mut lines = vec![format!("Venda #{} concluída!", sale.number)];
        for line in &sale.items {
            lines.push(format!(
                "  {} x{}  {}",
                line.item.name,
                line.quantity,
                self.money(line.line_total().cents())
            ));
        }
        if !sale.discount_rate.is_zero() {
            lines.push(format!(
                "  Desconto ({}): {}",
                sale.discount_rate,
                self.money(-sale.discount_amount.cents())
            ));
        }
        lines.push(format!("  Total: {}", self.money(sale.total.cents())));
        lines.push(format!("  Lucro: {}", self.money(sale.profit.cents())));
        lines.push("Digite 'ok' para o próximo cliente.".to_string());
        lines.join("\n") + "\n"
    }

    fn render_summary(&self, summary: &SessionSummary) -> String {
        let rows = [
            ("Tempo trabalhado", summary.elapsed_display()),
            ("Vendas", summary.sale_count.to_string()),
            ("Itens vendidos", summary.items_sold.to_string()),
            ("Faturamento", self.money(summary.revenue.cents())),
            ("Custos", self.money(summary.total_cost.cents())),
            ("Descontos", self.money(summary.total_discount.cents())),
            ("Lucro", self.money(summary.total_profit.cents())),
            ("Ticket médio", self.money(summary.average_ticket().cents())),
        ];

        let mut lines = vec![format!("Resumo da Sessão ({})", self.config.shop_name)];
        lines.extend(rows.iter().map(|(label, value)| format!("  {:<20} {}", label, value)));
        lines.push("Digite 'ok' para encerrar (zera a sessão).".to_string());
        lines.join("\n") + "\n"
    }

    fn render_history(&self, history: &HistoryResponse) -> String {
        if history.sales.is_empty() {
            return "Nenhuma venda nesta sessão.\n".to_string();
        }

        let mut lines = vec!["Vendas:".to_string()];
        for sale in &history.sales {
            lines.push(format!(
                "  #{:<3} {}  {:>3} itens  {:>14}  lucro {}",
                sale.number,
                sale.completed_at.with_timezone(&Local).format("%H:%M:%S"),
                sale.items_sold(),
                self.money(sale.total.cents()),
                self.money(sale.profit.cents())
            ));
        }
        lines.push(format!(
            "  Faturamento {} | Lucro {} | Ticket médio {}",
            self.money(history.summary.revenue.cents()),
            self.money(history.summary.total_profit.cents()),
            self.money(history.average_ticket.cents())
        ));
        lines.join("\n") + "\n"
    }
}

fn timer_label(state: TimerState) -> &'static str {
    match state {
        TimerState::Idle => "parado",
        TimerState::Running => "rodando",
        TimerState::Paused => "pausado",
        TimerState::Stopped => "encerrado",
    }
}

fn modal_hint(view: &View) -> String {
    match view {
        View::ConfirmingSale { .. } => "Confirme a venda primeiro ('ok').\n".to_string(),
        View::ShowingSummary { .. } => "Feche o resumo primeiro ('ok').\n".to_string(),
        View::Browsing => String::new(),
    }
}

/// Why a disabled action did nothing.
fn unavailable(snapshot: &SessionSnapshot, action: &str) -> String {
    if snapshot.view.is_modal() {
        return modal_hint(&snapshot.view);
    }
    match action {
        "vender" if snapshot.timer_state != TimerState::Running => {
            "Inicie o cronômetro para vender.\n".to_string()
        }
        "vender" => "Carrinho vazio.\n".to_string(),
        _ => "Cronômetro não está rodando.\n".to_string(),
    }
}

const HELP: &str = "\
Comandos:
  catalogo [categoria]   lista o catálogo (todos, ferramentas, peças, serviços)
  buscar <texto>         busca por nome
  add <id>               adiciona ao carrinho
  mais <id> / menos <id> ajusta a quantidade
  rm <id>                remove do carrinho
  desconto <pct>         aplica desconto (0 a 100)
  limpar                 esvazia o carrinho
  carrinho               mostra o carrinho
  iniciar / pausar       cronômetro
  parar                  encerra e mostra o resumo
  vender                 conclui a venda
  ok                     fecha confirmação ou resumo
  historico              vendas da sessão
  zerar                  zera a sessão
  sair                   sai
";

// =============================================================================
// Unit Tests
// =============================================================================
