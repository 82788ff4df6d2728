pub mod config;
pub mod feed;
pub mod harvest;
pub mod ingest;
pub mod logging;
pub mod matrix;
pub mod model;
pub mod render;
pub mod server;
pub mod storage;
pub mod ui;
