//! Domain models for tracked gifts.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{ser::Error as _, Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::{category::Category, common::*, recipient::Recipient};

/// A gift idea or purchase.
///
/// `recipient` and `category` are snapshot copies taken when the gift was
/// created or last edited. Later edits to the original records are not
/// reflected here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gift {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: GiftStatus,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    #[serde(default)]
    pub store: String,
    pub purchase_date: NaiveDate,
    pub recipient: Recipient,
    pub category: Category,
}

impl Gift {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        purchase_date: NaiveDate,
        recipient: Recipient,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            status: GiftStatus::Pending,
            price,
            store: String::new(),
            purchase_date,
            recipient,
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }

    pub fn with_status(mut self, status: GiftStatus) -> Self {
        self.status = status;
        self
    }

    pub fn mark_purchased(&mut self, on: NaiveDate) {
        self.status = GiftStatus::Purchased;
        self.purchase_date = on;
    }

    pub fn is_purchased(&self) -> bool {
        self.status == GiftStatus::Purchased
    }
}

impl Identifiable for Gift {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Gift {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Gift {
    fn display_label(&self) -> String {
        format!(
            "{} for {} [{}] {:.2}",
            self.name, self.recipient.name, self.status, self.price
        )
    }
}

// JSON has no representation for NaN or infinity; refuse instead of writing `null`.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !price.is_finite() {
        return Err(S::Error::custom(format!("price {price} is not a finite number")));
    }
    serializer.serialize_f64(*price)
}

/// Purchase state of a gift.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GiftStatus {
    #[default]
    Pending,
    Purchased,
}

impl GiftStatus {
    pub const ALL: [GiftStatus; 2] = [GiftStatus::Pending, GiftStatus::Purchased];

    pub fn as_str(self) -> &'static str {
        match self {
            GiftStatus::Pending => "Pending",
            GiftStatus::Purchased => "Purchased",
        }
    }
}

impl fmt::Display for GiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status label is neither `Pending` nor `Purchased`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGiftStatus(pub String);

impl fmt::Display for UnknownGiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gift status `{}`", self.0)
    }
}

impl std::error::Error for UnknownGiftStatus {}

impl FromStr for GiftStatus {
    type Err = UnknownGiftStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(GiftStatus::Pending),
            "purchased" => Ok(GiftStatus::Purchased),
            _ => Err(UnknownGiftStatus(value.to_string())),
        }
    }
}
