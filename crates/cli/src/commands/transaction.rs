//! `pagseguro transaction` and `pagseguro notification` - single transaction lookups.

use pagseguro::{PagSeguroClient, TransactionDetails};
use tracing::info;

use super::{CommandError, or_dash};

/// Look up a transaction by code.
pub async fn lookup(client: &PagSeguroClient, code: &str) -> Result<(), CommandError> {
    info!("Looking up transaction {code}...");
    let details = client.check_transaction(code).await?;
    log_details(&details);
    Ok(())
}

/// Resolve a notification code.
pub async fn notification(client: &PagSeguroClient, code: &str) -> Result<(), CommandError> {
    info!("Resolving notification {code}...");
    let details = client.check_notification(code).await?;
    log_details(&details);
    Ok(())
}

fn log_details(details: &TransactionDetails) {
    let transaction = &details.transaction;

    info!(
        code = %transaction.code,
        reference = transaction.reference.as_deref().unwrap_or("-"),
        status = %or_dash(transaction.status),
        kind = %or_dash(transaction.transaction_type),
        date = %or_dash(transaction.date),
        "Transaction"
    );
    info!(
        gross = %transaction.gross_amount,
        fees = %transaction.fee_amount,
        net = %transaction.net_amount,
        payment_method = ?transaction.payment_method_type.map(|m| m.description()),
        installments = ?details.installment_count,
        "Amounts"
    );

    for item in &details.items {
        info!(
            id = %item.id,
            quantity = item.quantity,
            amount = %item.amount,
            "{}",
            item.description
        );
    }

    if let Some(sender) = &details.sender {
        info!(
            name = sender.name.as_deref().unwrap_or("-"),
            email = sender.email.as_deref().unwrap_or("-"),
            "Sender"
        );
    }
}
