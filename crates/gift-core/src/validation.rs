//! Input checks performed before a record reaches the store.

use chrono::NaiveDate;
use gift_domain::{Category, Gift, GiftStatus, Recipient};
use uuid::Uuid;

use crate::CoreError;

/// Raw form input for creating or editing a gift.
#[derive(Debug, Clone)]
pub struct GiftDraft {
    pub name: String,
    pub description: String,
    /// Unparsed price text as typed by the user.
    pub price: String,
    pub store: String,
    pub purchase_date: NaiveDate,
    pub status: GiftStatus,
    pub recipient: Option<Recipient>,
    pub category: Option<Category>,
}

impl GiftDraft {
    pub fn new(purchase_date: NaiveDate) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            store: String::new(),
            purchase_date,
            status: GiftStatus::Pending,
            recipient: None,
            category: None,
        }
    }

    /// Pre-fills a draft from an existing gift for the edit flow.
    pub fn from_gift(gift: &Gift) -> Self {
        Self {
            name: gift.name.clone(),
            description: gift.description.clone(),
            price: gift.price.to_string(),
            store: gift.store.clone(),
            purchase_date: gift.purchase_date,
            status: gift.status,
            recipient: Some(gift.recipient.clone()),
            category: Some(gift.category.clone()),
        }
    }

    /// Builds a new gift with a fresh id.
    pub fn validate(&self) -> Result<Gift, CoreError> {
        self.build(Uuid::new_v4())
    }

    /// Builds the replacement for the gift identified by `id`.
    pub fn validate_update(&self, id: Uuid) -> Result<Gift, CoreError> {
        self.build(id)
    }

    fn build(&self, id: Uuid) -> Result<Gift, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Gift name is required".into()));
        }
        let price = parse_price(&self.price)?;
        let recipient = self
            .recipient
            .clone()
            .ok_or_else(|| CoreError::Validation("Select a recipient".into()))?;
        let category = self
            .category
            .clone()
            .ok_or_else(|| CoreError::Validation("Select a category".into()))?;

        Ok(Gift {
            id,
            name: name.to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            price,
            store: self.store.trim().to_string(),
            purchase_date: self.purchase_date,
            recipient,
            category,
        })
    }
}

fn parse_price(raw: &str) -> Result<f64, CoreError> {
    let invalid = || CoreError::Validation("Price must be a non-negative number".into());
    let price: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !price.is_finite() || price < 0.0 {
        return Err(invalid());
    }
    // `-0` passes the sign check; store it as plain zero.
    Ok(price.abs())
}

pub fn new_recipient(name: &str) -> Result<Recipient, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Recipient name is required".into()));
    }
    Ok(Recipient::new(name))
}

pub fn new_category(name: &str) -> Result<Category, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Category name is required".into()));
    }
    Ok(Category::new(name))
}
