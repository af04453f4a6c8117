//! `pagseguro search` - transaction search by date.

use chrono::{NaiveDate, NaiveDateTime};
use pagseguro::{PagSeguroClient, Transaction, TransactionQuery};
use tracing::info;

use super::{CommandError, or_dash};

/// Parse `YYYY-MM-DDTHH:MM`, or a bare date meaning midnight.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, pagseguro::query::DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM or YYYY-MM-DD, got {value:?}"))
}

/// Run a search and log each transaction found.
pub async fn run(
    client: &PagSeguroClient,
    query: &TransactionQuery,
    all_pages: bool,
) -> Result<(), CommandError> {
    if query.final_date < query.initial_date {
        return Err(CommandError::InvalidArgument(
            "--to must not be earlier than --from".to_string(),
        ));
    }

    let transactions = if all_pages {
        client.query_transactions(query).await?
    } else {
        let result = client.search_transactions(query).await?;
        info!(
            page = ?result.current_page(),
            total_pages = ?result.total_pages(),
            "Search page"
        );
        result.into_transactions()
    };

    for transaction in &transactions {
        log_transaction(transaction);
    }
    info!("{} transaction(s) found", transactions.len());
    Ok(())
}

fn log_transaction(transaction: &Transaction) {
    info!(
        date = %or_dash(transaction.date),
        reference = transaction.reference.as_deref().unwrap_or("-"),
        status = %or_dash(transaction.status),
        gross = %transaction.gross_amount,
        "{}",
        transaction.code
    );
}
