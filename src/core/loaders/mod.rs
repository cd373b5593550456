pub mod forge;
pub mod installer;

pub use forge::{ensure_forge, ForgeStatus};
pub use installer::{InstallerLauncher, ShellLauncher};
