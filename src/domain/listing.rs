// src/domain/listing.rs

use crate::domain::field::{Dollars, Field};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Success,
    Error,
}

/// Secondary facts found on a listing page. Exported as JSON only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingExtras {
    pub current_rent: Field<Dollars>,
    pub last_sale_date: Field<String>,
    pub last_sale_price: Field<Dollars>,
    pub agent_email: Field<String>,
}

/// One output row. Every field is always present, either as a value or as
/// `INFO_UNAVAILABLE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub url: String,
    pub status: ListingStatus,
    /// Failure reason; only set on `ListingStatus::Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub address: Field<String>,
    pub jurisdiction: Field<String>,
    pub purchase_price: Field<Dollars>,
    pub down_payment: Field<Dollars>,
    pub estimated_mortgage: Field<Dollars>,
    pub total_monthly_payment: Field<Dollars>,

    pub beds: Field<u32>,
    pub baths: Field<f32>,
    pub year_built: Field<u16>,
    pub sqft: Field<u32>,
    pub days_listed: Field<u32>,
    pub realtor_name: Field<String>,

    pub extras: ListingExtras,
}

impl ListingRecord {
    /// A record for a URL whose retries were exhausted: only the URL and the
    /// reason carry information.
    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: ListingStatus::Error,
            error: Some(reason.into()),
            address: Field::Unavailable,
            jurisdiction: Field::Unavailable,
            purchase_price: Field::Unavailable,
            down_payment: Field::Unavailable,
            estimated_mortgage: Field::Unavailable,
            total_monthly_payment: Field::Unavailable,
            beds: Field::Unavailable,
            baths: Field::Unavailable,
            year_built: Field::Unavailable,
            sqft: Field::Unavailable,
            days_listed: Field::Unavailable,
            realtor_name: Field::Unavailable,
            extras: ListingExtras::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ListingStatus::Success
    }
}
