// ─── RG Modpack Installer Core ───
// Sequential install pipeline for the RG Minecraft modpack.
//
// Architecture:
//   core/
//     modpack/    — Remote manifest fetch + validation
//     instance/   — Minecraft root discovery + directory layout checks
//     version/    — Installed version descriptor scan
//     loaders/    — Forge presence check + detached installer launch
//     downloader/ — Transport seam + sequential mod downloads
//     pipeline    — Stage ordering and failure reporting

pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod instance;
pub mod loaders;
pub mod modpack;
pub mod pipeline;
pub mod version;
