//! Raw document shapes.
//!
//! Every leaf is kept as text; conversion into typed values happens in the
//! sibling modules so a bad value reports which field it came from.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ErrorsXml {
    #[serde(default)]
    pub error: Vec<ErrorXml>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorXml {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutXml {
    pub code: String,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultXml {
    pub date: Option<String>,
    pub current_page: Option<String>,
    pub results_in_this_page: Option<String>,
    pub total_pages: Option<String>,
    #[serde(default)]
    pub transactions: TransactionsXml,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionsXml {
    #[serde(default)]
    pub transaction: Vec<TransactionXml>,
}

/// A `<transaction>` node.
///
/// Search results only carry the summary fields; notification and lookup
/// documents fill the rest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionXml {
    pub date: Option<String>,
    pub last_event_date: Option<String>,
    pub code: String,
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<PaymentMethodXml>,
    pub gross_amount: Option<String>,
    pub discount_amount: Option<String>,
    pub fee_amount: Option<String>,
    pub net_amount: Option<String>,
    pub extra_amount: Option<String>,
    pub escrow_end_date: Option<String>,
    pub installment_count: Option<String>,
    pub item_count: Option<String>,
    pub items: Option<ItemsXml>,
    pub sender: Option<SenderXml>,
    pub shipping: Option<ShippingXml>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentMethodXml {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemsXml {
    #[serde(default)]
    pub item: Vec<ItemXml>,
}

#[derive(Debug, Deserialize)]
pub struct ItemXml {
    pub id: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SenderXml {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<PhoneXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneXml {
    pub area_code: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShippingXml {
    pub address: Option<AddressXml>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub cost: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressXml {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}
