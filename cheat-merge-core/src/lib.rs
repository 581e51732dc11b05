//! Shared vocabulary for cheat-merge: regions and title normalization.

pub mod normalize;
pub mod region;

pub use normalize::{Disambiguator, NormalizedTitle, TitleKey, normalize, region_to_slug};
pub use region::Region;
