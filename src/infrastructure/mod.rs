// Infrastructure layer - External dependencies and adapters
pub mod bulk_snapshot_repository;
pub mod config;
pub mod http_client;
pub mod live_incremental_repository;
pub mod xy_payload;
