//! サービス層（ビジネスロジック）

pub mod turn_service;

pub use turn_service::TurnService;
