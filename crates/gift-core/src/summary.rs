//! Spending totals over a set of gifts.

use gift_domain::{Gift, GiftStatus, Recipient};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GiftSummary {
    pub count: usize,
    pub pending: usize,
    pub purchased: usize,
    pub total: f64,
    pub pending_total: f64,
    pub purchased_total: f64,
}

impl GiftSummary {
    pub fn from_gifts<'a>(gifts: impl IntoIterator<Item = &'a Gift>) -> Self {
        let mut summary = Self::default();
        for gift in gifts {
            summary.include(gift);
        }
        summary
    }

    fn include(&mut self, gift: &Gift) {
        self.count += 1;
        self.total += gift.price;
        match gift.status {
            GiftStatus::Pending => {
                self.pending += 1;
                self.pending_total += gift.price;
            }
            GiftStatus::Purchased => {
                self.purchased += 1;
                self.purchased_total += gift.price;
            }
        }
    }
}

/// Totals for one recipient, keyed by the recipient snapshot stored on gifts.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientSummary {
    pub recipient: Recipient,
    pub summary: GiftSummary,
}

/// Groups gifts by embedded recipient id, in order of first appearance.
pub fn summary_by_recipient(gifts: &[Gift]) -> Vec<RecipientSummary> {
    let mut groups: Vec<RecipientSummary> = Vec::new();
    for gift in gifts {
        match groups
            .iter_mut()
            .find(|group| group.recipient.id == gift.recipient.id)
        {
            Some(group) => group.summary.include(gift),
            None => {
                let mut summary = GiftSummary::default();
                summary.include(gift);
                groups.push(RecipientSummary {
                    recipient: gift.recipient.clone(),
                    summary,
                });
            }
        }
    }
    groups
}
