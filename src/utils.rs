pub mod sorted_exchange_union;
pub use sorted_exchange_union::sorted_exchange_union;
