//! Path calculation and opportunity selection

pub mod path;
pub mod selector;

pub use path::{Direction, PathCalculator};
pub use selector::OpportunitySelector;
