// Application layer - Use cases and the repository seam
pub mod graph_data_service;
pub mod graph_repository;
pub mod highlight_emphasis;
