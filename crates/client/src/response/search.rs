//! Transaction search results.

use chrono::{DateTime, FixedOffset};
use pagseguro_core::{Amount, PaymentMethodType, TransactionStatus, TransactionType};

use super::xml::{SearchResultXml, TransactionXml};
use super::{FromXml, parse_amount, parse_code, parse_number, parse_optional_datetime};
use crate::config::Config;
use crate::error::PagSeguroError;

/// Summary of one transaction, as listed by a search.
///
/// Fields the gateway leaves out stay `None`; amounts default to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: Option<DateTime<FixedOffset>>,
    pub last_event_date: Option<DateTime<FixedOffset>>,
    pub code: String,
    pub reference: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub payment_method_type: Option<PaymentMethodType>,
    pub gross_amount: Amount,
    pub discount_amount: Amount,
    pub fee_amount: Amount,
    pub net_amount: Amount,
    pub extra_amount: Amount,
}

impl TryFrom<&TransactionXml> for Transaction {
    type Error = PagSeguroError;

    fn try_from(raw: &TransactionXml) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_optional_datetime("date", raw.date.as_deref())?,
            last_event_date: parse_optional_datetime(
                "lastEventDate",
                raw.last_event_date.as_deref(),
            )?,
            code: raw.code.trim().to_string(),
            reference: raw
                .reference
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            transaction_type: parse_code("type", raw.kind.as_deref())?,
            status: parse_code("status", raw.status.as_deref())?,
            payment_method_type: parse_code(
                "paymentMethod.type",
                raw.payment_method.as_ref().and_then(|m| m.kind.as_deref()),
            )?,
            gross_amount: parse_amount("grossAmount", raw.gross_amount.as_deref())?,
            discount_amount: parse_amount("discountAmount", raw.discount_amount.as_deref())?,
            fee_amount: parse_amount("feeAmount", raw.fee_amount.as_deref())?,
            net_amount: parse_amount("netAmount", raw.net_amount.as_deref())?,
            extra_amount: parse_amount("extraAmount", raw.extra_amount.as_deref())?,
        })
    }
}

/// One page of a transaction search.
///
/// Built once from a document and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSearchResult {
    date: Option<DateTime<FixedOffset>>,
    current_page: Option<u32>,
    results_in_page: Option<u32>,
    total_pages: Option<u32>,
    transactions: Vec<Transaction>,
}

impl TransactionSearchResult {
    /// When the search ran.
    #[must_use]
    pub const fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.date
    }

    /// 1-based number of this page.
    #[must_use]
    pub const fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Number of transactions the gateway reports for this page.
    #[must_use]
    pub const fn results_in_page(&self) -> Option<u32> {
        self.results_in_page
    }

    /// Total number of pages for the search.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Transactions in document order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Whether another page follows this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        matches!(
            (self.current_page, self.total_pages),
            (Some(current), Some(total)) if current < total
        )
    }

    /// Take the transactions out of the result.
    #[must_use]
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }
}

impl FromXml for TransactionSearchResult {
    const ROOT: &'static str = "transactionSearchResult";

    fn from_xml(xml: &str, _config: &Config) -> Result<Self, PagSeguroError> {
        let raw: SearchResultXml = super::parse_document(xml, Self::ROOT)?;

        Ok(Self {
            date: parse_optional_datetime("date", raw.date.as_deref())?,
            current_page: parse_number("currentPage", raw.current_page.as_deref())?,
            results_in_page: parse_number(
                "resultsInThisPage",
                raw.results_in_this_page.as_deref(),
            )?,
            total_pages: parse_number("totalPages", raw.total_pages.as_deref())?,
            transactions: raw
                .transactions
                .transaction
                .iter()
                .map(Transaction::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SEARCH_XML: &str = r"
<transactionSearchResult>
    <date>2011-02-16T20:14:35.000-02:00</date>
    <currentPage>1</currentPage>
    <resultsInThisPage>2</resultsInThisPage>
    <totalPages>1</totalPages>
    <transactions>
        <transaction>
            <date>2011-02-05T15:46:12.000-02:00</date>
            <lastEventDate>2011-02-15T17:39:14.000-03:00</lastEventDate>
            <code>9E884542-81B3-4419-9A75-BCC6FB495EF1</code>
            <reference>REF1234</reference>
            <type>1</type>
            <status>3</status>
            <paymentMethod>
                <type>1</type>
            </paymentMethod>
            <grossAmount>49900.00</grossAmount>
            <discountAmount>0.00</discountAmount>
            <feeAmount>0.00</feeAmount>
            <netAmount>49900.00</netAmount>
            <extraAmount>0.00</extraAmount>
        </transaction>
        <transaction>
            <date>2011-02-07T18:57:52.000-02:00</date>
            <lastEventDate>2011-02-14T21:37:24.000-03:00</lastEventDate>
            <code>2FB07A22-68FF-4F83-A356-24153A0C05E1</code>
            <reference>REF5678</reference>
            <type>3</type>
            <status>4</status>
            <paymentMethod>
                <type>3</type>
            </paymentMethod>
            <grossAmount>26900.00</grossAmount>
            <discountAmount>0.00</discountAmount>
            <feeAmount>0.00</feeAmount>
            <netAmount>26900.00</netAmount>
            <extraAmount>0.00</extraAmount>
        </transaction>
    </transactions>
</transactionSearchResult>";

    #[test]
    fn test_parse_search_result() {
        let result = TransactionSearchResult::from_xml(SEARCH_XML, &Config::default()).unwrap();

        assert_eq!(result.current_page(), Some(1));
        assert_eq!(result.results_in_page(), Some(2));
        assert_eq!(result.total_pages(), Some(1));
        assert!(!result.has_next_page());
        assert_eq!(
            result.date().unwrap().to_rfc3339(),
            "2011-02-16T20:14:35-02:00"
        );

        let codes: Vec<&str> = result.transactions().iter().map(|t| t.code.as_str()).collect();
        assert_eq!(
            codes,
            [
                "9E884542-81B3-4419-9A75-BCC6FB495EF1",
                "2FB07A22-68FF-4F83-A356-24153A0C05E1"
            ]
        );
    }

    #[test]
    fn test_transaction_fields() {
        let result = TransactionSearchResult::from_xml(SEARCH_XML, &Config::default()).unwrap();
        let first = &result.transactions()[0];

        assert_eq!(first.reference.as_deref(), Some("REF1234"));
        assert_eq!(first.transaction_type, Some(TransactionType::Payment));
        assert_eq!(first.status, Some(TransactionStatus::Paid));
        assert_eq!(first.payment_method_type, Some(PaymentMethodType::CreditCard));
        assert_eq!(first.gross_amount, Amount::from_cents(4_990_000));
        assert_eq!(first.net_amount.to_string(), "49900.00");
        assert_eq!(first.fee_amount, Amount::ZERO);

        let second = &result.transactions()[1];
        assert_eq!(second.transaction_type, Some(TransactionType::Other(3)));
        assert_eq!(second.status, Some(TransactionStatus::Available));
        assert_eq!(second.payment_method_type, Some(PaymentMethodType::OnlineDebit));
        assert_eq!(
            second.last_event_date.unwrap().to_rfc3339(),
            "2011-02-14T21:37:24-03:00"
        );
    }

    #[test]
    fn test_single_transaction() {
        let xml = r"<transactionSearchResult>
            <currentPage>2</currentPage>
            <resultsInThisPage>1</resultsInThisPage>
            <totalPages>3</totalPages>
            <transactions>
                <transaction>
                    <date>2011-02-05T15:46:12.000-02:00</date>
                    <code>ABC</code>
                    <type>1</type>
                    <status>1</status>
                    <grossAmount>10.00</grossAmount>
                </transaction>
            </transactions>
        </transactionSearchResult>";

        let result = TransactionSearchResult::from_xml(xml, &Config::default()).unwrap();
        assert_eq!(result.transactions().len(), 1);
        assert!(result.has_next_page());
        assert!(result.date().is_none());

        let transaction = &result.transactions()[0];
        assert_eq!(transaction.status, Some(TransactionStatus::AwaitingPayment));
        assert!(transaction.reference.is_none());
        assert!(transaction.payment_method_type.is_none());
        assert_eq!(transaction.discount_amount, Amount::ZERO);
    }

    #[test]
    fn test_no_transactions() {
        let xml = r"<transactionSearchResult>
            <date>2011-02-16T20:14:35.000-02:00</date>
            <currentPage>1</currentPage>
            <resultsInThisPage>0</resultsInThisPage>
            <totalPages>0</totalPages>
        </transactionSearchResult>";

        let result = TransactionSearchResult::from_xml(xml, &Config::default()).unwrap();
        assert!(result.transactions().is_empty());
        assert_eq!(result.results_in_page(), Some(0));
    }

    #[test]
    fn test_sparse_transaction_kept_as_parsed() {
        let xml = r"<transactionSearchResult>
            <transactions>
                <transaction><code>X</code><status>3</status></transaction>
                <transaction><code>Y</code></transaction>
            </transactions>
        </transactionSearchResult>";

        let result = TransactionSearchResult::from_xml(xml, &Config::default()).unwrap();
        assert_eq!(result.transactions().len(), 2);

        let first = &result.transactions()[0];
        assert_eq!(first.code, "X");
        assert!(first.date.is_none());
        assert!(first.transaction_type.is_none());
        assert_eq!(first.status, Some(TransactionStatus::Paid));

        let second = &result.transactions()[1];
        assert!(second.status.is_none());
        assert_eq!(second.gross_amount, Amount::ZERO);
    }

    #[test]
    fn test_present_but_invalid_date() {
        let xml = r"<transactionSearchResult><transactions>
            <transaction><date>yesterday</date><code>X</code></transaction>
        </transactions></transactionSearchResult>";
        let err = TransactionSearchResult::from_xml(xml, &Config::default()).unwrap_err();
        assert!(matches!(err, PagSeguroError::Parse(_)));
    }

    #[test]
    fn test_malformed_xml() {
        let xml = "<transactionSearchResult><currentPage>1</totalPages>";
        let err = TransactionSearchResult::from_xml(xml, &Config::default()).unwrap_err();
        assert!(matches!(err, PagSeguroError::Xml(_)));
    }

    #[test]
    fn test_bad_number() {
        let xml = "<transactionSearchResult><currentPage>one</currentPage></transactionSearchResult>";
        let err = TransactionSearchResult::from_xml(xml, &Config::default()).unwrap_err();
        assert!(matches!(err, PagSeguroError::Parse(_)));
    }

    #[test]
    fn test_errors_document() {
        let xml = "<errors><error><code>13003</code><message>invalid initialDate</message></error></errors>";
        let err = TransactionSearchResult::from_xml(xml, &Config::default()).unwrap_err();
        match err {
            PagSeguroError::Gateway(errors) => assert_eq!(errors[0].code, "13003"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
