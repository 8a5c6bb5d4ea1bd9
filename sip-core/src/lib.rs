//! Core types for solar irradiance requests and responses.
//!
//! - `request`: form inputs → validated [`request::VisualizeRequest`]
//! - `sample`: decoding of backend `{data: [...]}` bodies into [`sample::RawSample`]
//! - `shape`: one-shot classification of a sample batch
//! - `client` (feature `api`): reqwest client for the data, export and geocoding endpoints

pub mod error;
pub mod geocode;
pub mod granularity;
pub mod request;
pub mod sample;
pub mod shape;
pub mod source;

#[cfg(feature = "api")]
pub mod client;
