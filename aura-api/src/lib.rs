//! # Aura API
//!
//! Vocabulary shared by the engine and the desk: the closed asset universe,
//! price snapshots, trade receipts, the seams towards the outside world
//! (`QuoteSource`, `KeyValueStore`) and the error taxonomy.

pub mod error;
pub mod model;
pub mod traits;

pub use error::{FeedError, PersistenceError, Rejection, TradeError, UnknownAsset};
pub use model::asset::Asset;
pub use model::market_data::{PriceSnapshot, Quote};
pub use model::trade::{Fill, Side};
pub use traits::quote_source::QuoteSource;
pub use traits::store::KeyValueStore;

pub mod prelude {
    pub use crate::model::asset::Asset;
    pub use crate::model::market_data::{PriceSnapshot, Quote};
    pub use crate::model::trade::{Fill, Side};
    pub use crate::traits::quote_source::QuoteSource;
    pub use crate::traits::store::KeyValueStore;
}
