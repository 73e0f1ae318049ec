pub mod etl;
pub mod extract;
pub mod pipeline;
pub mod schedule;
pub mod writer;

pub use crate::domain::model::{
    ListingOutcome, ListingRecord, RunReport, RunStatus, ScrapeBatch, CSV_HEADER,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, MAX_LISTINGS};
pub use crate::utils::error::Result;
pub use etl::ScrapeEngine;
