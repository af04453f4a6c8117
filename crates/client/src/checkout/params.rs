//! Checkout form fields.
//!
//! Each source struct has a static table of `(gateway key, accessor,
//! validator)` entries. Building params walks the tables in order, drops
//! absent or empty values and validates what is left.

use std::collections::BTreeMap;

use pagseguro_core::{is_valid_cnpj, is_valid_cpf, is_valid_email};
use serde::Serialize;

use super::{CheckoutRequest, Item, Sender, Shipping};
use crate::error::{InvalidValue, ValidationError};

/// Birth date format expected by the gateway.
const BORN_DATE_FORMAT: &str = "%d/%m/%Y";

/// Country sent with an address that has none.
const DEFAULT_COUNTRY: &str = "BRA";

/// Flat gateway form, ready to be URL-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckoutParams(BTreeMap<String, String>);

impl CheckoutParams {
    /// Value for a gateway key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a gateway key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

/// Checks applied to a field value before it is emitted.
#[derive(Debug, Clone, Copy)]
enum Validator {
    Email,
    Cpf,
    Cnpj,
}

impl Validator {
    fn check(self, value: &str) -> Result<(), InvalidValue> {
        match self {
            Self::Email => {
                is_valid_email(value)?;
            }
            Self::Cpf => {
                is_valid_cpf(value)?;
            }
            Self::Cnpj => {
                is_valid_cnpj(value)?;
            }
        }
        Ok(())
    }
}

/// One entry of a field table.
struct Field<T> {
    key: &'static str,
    value: fn(&T) -> Option<String>,
    validator: Option<Validator>,
}

static REQUEST_FIELDS: &[Field<CheckoutRequest>] = &[
    Field {
        key: "reference",
        value: |r| Some(r.reference.clone()),
        validator: None,
    },
    Field {
        key: "extraAmount",
        value: |r| r.extra_amount.map(|a| a.to_string()),
        validator: None,
    },
    Field {
        key: "redirectURL",
        value: |r| r.redirect_url.clone(),
        validator: None,
    },
    Field {
        key: "notificationURL",
        value: |r| r.notification_url.clone(),
        validator: None,
    },
    Field {
        key: "abandonURL",
        value: |r| r.abandon_url.clone(),
        validator: None,
    },
];

static SENDER_FIELDS: &[Field<Sender>] = &[
    Field {
        key: "senderName",
        value: |s| s.name.clone(),
        validator: None,
    },
    Field {
        key: "senderAreaCode",
        value: |s| s.area_code.clone(),
        validator: None,
    },
    Field {
        key: "senderPhone",
        value: |s| s.phone.clone(),
        validator: None,
    },
    Field {
        key: "senderEmail",
        value: |s| s.email.clone(),
        validator: Some(Validator::Email),
    },
    Field {
        key: "senderCPF",
        value: |s| s.cpf.clone(),
        validator: Some(Validator::Cpf),
    },
    Field {
        key: "senderCNPJ",
        value: |s| s.cnpj.clone(),
        validator: Some(Validator::Cnpj),
    },
    Field {
        key: "senderBornDate",
        value: |s| s.born_date.map(|d| d.format(BORN_DATE_FORMAT).to_string()),
        validator: None,
    },
];

static SHIPPING_FIELDS: &[Field<Shipping>] = &[
    Field {
        key: "shippingType",
        value: |s| s.shipping_type.map(|t| t.code().to_string()),
        validator: None,
    },
    Field {
        key: "shippingAddressStreet",
        value: |s| s.street.clone(),
        validator: None,
    },
    Field {
        key: "shippingAddressNumber",
        value: |s| s.number.clone(),
        validator: None,
    },
    Field {
        key: "shippingAddressComplement",
        value: |s| s.complement.clone(),
        validator: None,
    },
    Field {
        key: "shippingAddressDistrict",
        value: |s| s.district.clone(),
        validator: None,
    },
    Field {
        key: "shippingAddressPostalCode",
        value: |s| s.postal_code.clone(),
        validator: None,
    },
    Field {
        key: "shippingAddressCity",
        value: |s| s.city.clone(),
        validator: None,
    },
    Field {
        key: "shippingAddressState",
        value: |s| s.state.clone(),
        validator: None,
    },
    Field {
        key: "shippingAddressCountry",
        value: |s| {
            s.country
                .clone()
                .filter(|c| !c.is_empty())
                .or_else(|| (!s.address_is_empty()).then(|| DEFAULT_COUNTRY.to_string()))
        },
        validator: None,
    },
    Field {
        key: "shippingCost",
        value: |s| s.cost.map(|c| c.to_string()),
        validator: None,
    },
];

/// Item keys get the 1-based line number appended.
static ITEM_FIELDS: &[Field<Item>] = &[
    Field {
        key: "itemId",
        value: |i| Some(i.id.clone()),
        validator: None,
    },
    Field {
        key: "itemDescription",
        value: |i| Some(i.description.clone()),
        validator: None,
    },
    Field {
        key: "itemAmount",
        value: |i| Some(i.amount.to_string()),
        validator: None,
    },
    Field {
        key: "itemQuantity",
        value: |i| Some(i.quantity.to_string()),
        validator: None,
    },
    Field {
        key: "itemWeight",
        value: |i| Some(i.weight.to_string()),
        validator: None,
    },
    Field {
        key: "itemShippingCost",
        value: |i| i.shipping_cost.map(|c| c.to_string()),
        validator: None,
    },
];

pub(super) fn build(request: &CheckoutRequest) -> Result<CheckoutParams, ValidationError> {
    let mut params = CheckoutParams::default();
    let credentials = request.credentials();
    let config = request.config();

    params.insert("email", credentials.email.as_str());
    params.insert("token", credentials.expose_token());
    params.insert("receiverEmail", credentials.email.as_str());
    params.insert("currency", config.currency.as_str());

    emit(&mut params, SENDER_FIELDS, &request.sender, None)?;

    if config.use_shipping {
        emit(&mut params, SHIPPING_FIELDS, &request.shipping, None)?;
    } else {
        params.insert("shippingAddressRequired", "false");
    }

    for (index, item) in request.items.iter().enumerate() {
        emit(&mut params, ITEM_FIELDS, item, Some(index + 1))?;
    }

    emit(&mut params, REQUEST_FIELDS, request, None)?;

    Ok(params)
}

fn emit<T>(
    params: &mut CheckoutParams,
    fields: &[Field<T>],
    source: &T,
    index: Option<usize>,
) -> Result<(), ValidationError> {
    for field in fields {
        let Some(value) = (field.value)(source).filter(|v| !v.is_empty()) else {
            continue;
        };

        if let Some(validator) = field.validator {
            validator
                .check(&value)
                .map_err(|reason| ValidationError::new(field.key, reason))?;
        }

        match index {
            Some(index) => params.insert(format!("{}{index}", field.key), value),
            None => params.insert(field.key, value),
        }
    }
    Ok(())
}
