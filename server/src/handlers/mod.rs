//! Request handlers for the change feed.

mod feed;

pub use feed::*;
