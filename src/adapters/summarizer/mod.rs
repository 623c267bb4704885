//! Summarizer adapters.
//!
//! - `MockSummarizer` - Scripted results with call capture

mod mock;

pub use mock::{MockSummarizer, MOCK_MODEL};
