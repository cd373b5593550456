pub mod layout;
pub mod paths;

pub use layout::MinecraftDir;
pub use paths::default_minecraft_dir;
