pub mod cart_view;
pub mod storefront;

pub use storefront::*;
