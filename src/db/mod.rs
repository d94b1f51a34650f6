pub mod migrations;
pub mod repository;
pub mod transfer;
