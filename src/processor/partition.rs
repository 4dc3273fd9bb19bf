//! Split extracted offers into the "mine" and "others" views
//!
//! A plain filter on `is_my_offer`; relative order inside each view is the
//! order of the pass output.

use crate::types::ExtractedOffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferTab {
    Mine,
    Others,
}

impl OfferTab {
    pub fn includes(&self, offer: &ExtractedOffer) -> bool {
        match self {
            OfferTab::Mine => offer.is_my_offer,
            OfferTab::Others => !offer.is_my_offer,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PartitionedOffers {
    pub mine: Vec<ExtractedOffer>,
    pub others: Vec<ExtractedOffer>,
}

impl PartitionedOffers {
    pub fn len(&self) -> usize {
        self.mine.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mine.is_empty() && self.others.is_empty()
    }
}

pub fn partition_offers(offers: Vec<ExtractedOffer>) -> PartitionedOffers {
    let (mine, others) = offers.into_iter().partition(|offer| offer.is_my_offer);
    PartitionedOffers { mine, others }
}

/// Borrowing view of one tab
pub fn offers_in_tab(offers: &[ExtractedOffer], tab: OfferTab) -> Vec<&ExtractedOffer> {
    offers.iter().filter(|offer| tab.includes(offer)).collect()
}
