//! CSV/YAML file storage rooted in one data directory.

pub mod connection;
pub mod member_repository;
pub mod order_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use member_repository::MemberRepository;
pub use order_repository::OrderRepository;
