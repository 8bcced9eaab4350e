//! Use cases

pub mod scrape_service;

pub use scrape_service::ScrapeService;
