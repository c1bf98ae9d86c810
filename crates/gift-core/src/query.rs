//! Search and ordering for the gift list.

use gift_domain::{Gift, GiftStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortOrder::Ascending
    }

    pub fn toggled(self) -> Self {
        Self::from_ascending(!self.is_ascending())
    }
}

/// Filters gifts whose name contains `search_term` (case-insensitive) and
/// sorts them by name. Ties keep their collection order.
pub fn query<'a>(gifts: &'a [Gift], search_term: &str, order: SortOrder) -> Vec<&'a Gift> {
    GiftQuery::new(search_term, order).run(gifts)
}

/// A reusable gift-list view: name search, optional status filter, ordering.
#[derive(Debug, Clone, Default)]
pub struct GiftQuery {
    pub search: String,
    pub order: SortOrder,
    pub status: Option<GiftStatus>,
}

impl GiftQuery {
    pub fn new(search: impl Into<String>, order: SortOrder) -> Self {
        Self {
            search: search.into(),
            order,
            status: None,
        }
    }

    pub fn with_status(mut self, status: GiftStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, gift: &Gift) -> bool {
        if let Some(status) = self.status {
            if gift.status != status {
                return false;
            }
        }
        self.search.is_empty() || gift.name.to_lowercase().contains(&self.search.to_lowercase())
    }

    pub fn run<'a>(&self, gifts: &'a [Gift]) -> Vec<&'a Gift> {
        let mut view: Vec<&Gift> = gifts.iter().filter(|gift| self.matches(gift)).collect();
        match self.order {
            SortOrder::Ascending => view.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::Descending => view.sort_by(|a, b| b.name.cmp(&a.name)),
        }
        view
    }
}
