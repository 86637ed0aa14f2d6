pub mod extraction_service;
pub mod label_mapper;
pub mod vote_service;

pub use extraction_service::ExtractionService;
