//! Full transaction documents, as returned by notification and code lookups.

use chrono::{DateTime, FixedOffset};
use pagseguro_core::{Amount, ShippingType};

use super::search::Transaction;
use super::xml::{AddressXml, ItemXml, SenderXml, ShippingXml, TransactionXml};
use super::{FromXml, non_empty, parse_amount, parse_code, parse_number, parse_optional_datetime};
use crate::config::Config;
use crate::error::PagSeguroError;

/// A transaction with everything the gateway reports about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetails {
    /// Fields shared with search results.
    pub transaction: Transaction,
    /// Specific payment method, e.g. `101` for Visa.
    pub payment_method_code: Option<u16>,
    /// When the funds become available.
    pub escrow_end_date: Option<DateTime<FixedOffset>>,
    pub installment_count: Option<u32>,
    pub item_count: Option<u32>,
    pub items: Vec<TransactionItem>,
    pub sender: Option<TransactionSender>,
    pub shipping: Option<TransactionShipping>,
}

/// A line of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionItem {
    pub id: String,
    pub description: String,
    pub quantity: u32,
    /// Unit price
    pub amount: Amount,
}

/// The buyer, as the gateway recorded them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionSender {
    pub name: Option<String>,
    pub email: Option<String>,
    pub area_code: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionShipping {
    pub shipping_type: Option<ShippingType>,
    pub cost: Amount,
    pub address: Option<TransactionAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionAddress {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl TransactionDetails {
    /// Transaction code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.transaction.code
    }

    /// Sum of `quantity * amount` over the items.
    #[must_use]
    pub fn items_total(&self) -> Amount {
        self.items
            .iter()
            .map(|item| item.amount.value() * rust_decimal::Decimal::from(item.quantity))
            .sum::<rust_decimal::Decimal>()
            .into()
    }
}

impl FromXml for TransactionDetails {
    const ROOT: &'static str = "transaction";

    fn from_xml(xml: &str, _config: &Config) -> Result<Self, PagSeguroError> {
        let raw: TransactionXml = super::parse_document(xml, Self::ROOT)?;

        Ok(Self {
            transaction: Transaction::try_from(&raw)?,
            payment_method_code: parse_number(
                "paymentMethod.code",
                raw.payment_method.as_ref().and_then(|m| m.code.as_deref()),
            )?,
            escrow_end_date: parse_optional_datetime(
                "escrowEndDate",
                raw.escrow_end_date.as_deref(),
            )?,
            installment_count: parse_number("installmentCount", raw.installment_count.as_deref())?,
            item_count: parse_number("itemCount", raw.item_count.as_deref())?,
            items: raw
                .items
                .as_ref()
                .map(|items| items.item.iter().map(convert_item).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default(),
            sender: raw.sender.as_ref().map(convert_sender),
            shipping: raw.shipping.as_ref().map(convert_shipping).transpose()?,
        })
    }
}

fn text(value: Option<&String>) -> Option<String> {
    non_empty(value.map(String::as_str)).map(|v| v.trim().to_string())
}

fn convert_item(raw: &ItemXml) -> Result<TransactionItem, PagSeguroError> {
    Ok(TransactionItem {
        id: text(raw.id.as_ref()).unwrap_or_default(),
        description: text(raw.description.as_ref()).unwrap_or_default(),
        quantity: parse_number("item.quantity", raw.quantity.as_deref())?.unwrap_or(1),
        amount: parse_amount("item.amount", raw.amount.as_deref())?,
    })
}

fn convert_sender(raw: &SenderXml) -> TransactionSender {
    TransactionSender {
        name: text(raw.name.as_ref()),
        email: text(raw.email.as_ref()),
        area_code: raw.phone.as_ref().and_then(|p| text(p.area_code.as_ref())),
        phone: raw.phone.as_ref().and_then(|p| text(p.number.as_ref())),
    }
}

fn convert_shipping(raw: &ShippingXml) -> Result<TransactionShipping, PagSeguroError> {
    Ok(TransactionShipping {
        shipping_type: parse_code("shipping.type", raw.kind.as_deref())?,
        cost: parse_amount("shipping.cost", raw.cost.as_deref())?,
        address: raw.address.as_ref().map(convert_address),
    })
}

fn convert_address(raw: &AddressXml) -> TransactionAddress {
    TransactionAddress {
        street: text(raw.street.as_ref()),
        number: text(raw.number.as_ref()),
        complement: text(raw.complement.as_ref()),
        district: text(raw.district.as_ref()),
        postal_code: text(raw.postal_code.as_ref()),
        city: text(raw.city.as_ref()),
        state: text(raw.state.as_ref()),
        country: text(raw.country.as_ref()),
    }
}
