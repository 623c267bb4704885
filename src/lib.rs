//! EchoWave - Anonymous feedback surveys
//!
//! Owners create surveys, respondents answer them anonymously through a
//! share link, and results stay hidden until a minimum number of responses
//! has been collected.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
