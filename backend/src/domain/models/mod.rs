pub mod member;
pub mod order;
pub mod week_window;
