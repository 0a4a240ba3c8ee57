pub mod order_mapper;
pub mod week_mapper;
