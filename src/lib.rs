pub mod fetch;
pub mod ingest;
pub mod occupancy;
pub mod output;
pub mod publish;
pub mod server;
