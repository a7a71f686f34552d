//! Transport layer for the PokeAPI SDK.

pub mod http;

pub use http::HttpTransport;
