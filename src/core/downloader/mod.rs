pub mod client;
pub mod mods;

pub use client::{HttpSource, RemoteSource};
pub use mods::{file_name_from_url, DownloadSummary, ModDownloader, ModOutcome};
