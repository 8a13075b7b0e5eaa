//! Tile acquisition over HTTP with bounded retries.

mod fetcher;
mod http;
mod retry;

pub use fetcher::{TileFetchResult, TileFetcher};
pub use http::{HttpClient, ReqwestClient};
pub use retry::{Backoff, Sleeper, ThreadSleeper};
