//! HTTP access to the analysis service

pub mod client;
pub mod transport;

pub use client::AnalysisClient;
pub use transport::{RawResponse, ReqwestTransport, Transport};
