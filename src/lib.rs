//! Ranks trending hashtags or sounds from line-delimited video metadata.
//!
//! The pipeline runs one way: [`video`] extracts a record per line,
//! [`groups`] accumulates records by hashtag or sound id, [`ranking`] picks
//! the top groups and [`report`] writes them out. [`pipeline::run`] ties the
//! steps together for the binary.

pub mod config;
pub mod error;
pub mod groups;
pub mod hashtag;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod shared;
pub mod video;

pub use config::{Mode, ReportFormat, Settings};
pub use error::{RecordError, TrendError};
pub use groups::{accumulate, accumulate_parallel, Group, Groups};
pub use pipeline::{run, Summary};
pub use ranking::{select_top, RankKey};
pub use report::render;
pub use video::Video;
