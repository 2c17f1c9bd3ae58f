// Text cleaning — tweet normalization and word-cloud preparation.

pub mod cloud;
pub mod normalize;
