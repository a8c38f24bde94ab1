pub mod config;
pub mod logging;

pub mod batch;
pub mod fetcher;
pub mod probe;
pub mod region;
pub mod storage;
pub mod transport;
pub mod url_model;
