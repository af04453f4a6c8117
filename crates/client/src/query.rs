//! Transaction search queries.

use chrono::NaiveDateTime;

use crate::config::Credentials;

/// Date format the search endpoint accepts.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A date-range search over the seller's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionQuery {
    pub initial_date: NaiveDateTime,
    pub final_date: NaiveDateTime,
    /// 1-based page; the gateway starts at 1 when absent.
    pub page: Option<u32>,
    /// Page size, at most 1000 on the gateway side.
    pub max_results: Option<u32>,
}

impl TransactionQuery {
    /// Search transactions created between two instants.
    #[must_use]
    pub const fn new(initial_date: NaiveDateTime, final_date: NaiveDateTime) -> Self {
        Self {
            initial_date,
            final_date,
            page: None,
            max_results: None,
        }
    }

    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Query string pairs, credentials included.
    pub(crate) fn to_params(&self, credentials: &Credentials) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("email", credentials.email.clone()),
            ("token", credentials.expose_token().to_string()),
            ("initialDate", self.initial_date.format(DATE_FORMAT).to_string()),
            ("finalDate", self.final_date.format(DATE_FORMAT).to_string()),
        ];

        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(max_results) = self.max_results {
            params.push(("maxPageResults", max_results.to_string()));
        }

        params
    }
}
