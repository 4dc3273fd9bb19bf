//! Offer processing: ownership, extraction, passes and partitioning

pub mod extraction;
pub mod ownership;
pub mod partition;
pub mod pipeline;

pub use extraction::{extract_offer, ExtractionMode, RecoveredOffer, ShapeMatcher};
pub use ownership::{classify_ownership, is_my_offer, OwnershipClassifier};
pub use partition::{offers_in_tab, partition_offers, OfferTab, PartitionedOffers};
pub use pipeline::{extract_offers, offer_key, ExtractionOptions, ExtractionResults, OfferPipeline};
