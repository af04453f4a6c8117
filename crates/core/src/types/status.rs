//! Numeric code enums used by the gateway.
//!
//! The gateway reports transaction types, statuses and payment methods as
//! small integers. Unknown codes are kept as `Other(code)` so a new value on
//! the gateway side never breaks parsing.

/// Macro to define a gateway code enum.
///
/// Creates an enum with one variant per known code plus `Other(u16)`, with:
/// - `code()` and `description()` accessors
/// - `From<u16>` / `Into<u16>` conversions
/// - `Display` (the description) and serde as the bare integer
///
/// # Example
///
/// ```rust
/// # use pagseguro_core::define_code_enum;
/// define_code_enum! {
///     /// Card brands.
///     Brand {
///         Visa = 101 => "Visa",
///         Mastercard = 102 => "Mastercard",
///     }
/// }
///
/// assert_eq!(Brand::from(101), Brand::Visa);
/// assert_eq!(Brand::from(999), Brand::Other(999));
/// assert_eq!(Brand::Mastercard.code(), 102);
/// ```
#[macro_export]
macro_rules! define_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $desc:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(from = "u16", into = "u16")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A code this library does not know about.
            Other(u16),
        }

        impl $name {
            /// The numeric code sent by the gateway.
            #[must_use]
            pub const fn code(&self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Other(code) => *code,
                }
            }

            /// Human-readable description of the code.
            #[must_use]
            pub const fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)+
                    Self::Other(_) => "Unknown",
                }
            }
        }

        impl From<u16> for $name {
            fn from(code: u16) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for u16 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self {
                    Self::Other(code) => write!(f, "Unknown ({code})"),
                    known => f.write_str(known.description()),
                }
            }
        }
    };
}

define_code_enum! {
    /// Kind of transaction.
    TransactionType {
        /// Regular payment: the buyer pays the seller.
        Payment = 1 => "Payment",
        /// Recurring charge from a subscription.
        Subscription = 11 => "Subscription",
    }
}

define_code_enum! {
    /// Transaction status.
    TransactionStatus {
        /// The buyer started the transaction but has not paid yet.
        AwaitingPayment = 1 => "Awaiting payment",
        /// The buyer paid and the payment is being reviewed.
        InAnalysis = 2 => "In analysis",
        /// Payment confirmed.
        Paid = 3 => "Paid",
        /// Funds released to the seller.
        Available = 4 => "Available",
        /// The buyer opened a dispute.
        InDispute = 5 => "In dispute",
        /// Amount returned to the buyer.
        Returned = 6 => "Returned",
        /// Transaction cancelled.
        Cancelled = 7 => "Cancelled",
        /// Amount charged back to the buyer after a dispute.
        Debited = 8 => "Debited",
        /// Funds held while a chargeback is analysed.
        TemporaryRetention = 9 => "Temporary retention",
    }
}

impl TransactionStatus {
    /// Whether the buyer's payment has been confirmed.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        matches!(self, Self::Paid | Self::Available)
    }
}

define_code_enum! {
    /// Payment method used by the buyer.
    PaymentMethodType {
        CreditCard = 1 => "Credit card",
        Boleto = 2 => "Boleto",
        OnlineDebit = 3 => "Online debit",
        Balance = 4 => "PagSeguro balance",
        OiPaggo = 5 => "Oi Paggo",
        Deposit = 7 => "Account deposit",
    }
}

define_code_enum! {
    /// Shipping service requested at checkout.
    ShippingType {
        /// Regular mail (Encomenda Normal).
        Pac = 1 => "PAC",
        Sedex = 2 => "SEDEX",
        /// Seller chooses the service.
        Unspecified = 3 => "Unspecified",
    }
}
