//! Client-side cart aggregation for the lunet storefront.

pub mod store;

pub use store::{Cart, CartEvent, CartItem, CartKey, SubscriptionId};
