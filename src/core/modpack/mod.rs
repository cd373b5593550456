pub mod manifest;

pub use manifest::{fetch_modpack, Modpack};
