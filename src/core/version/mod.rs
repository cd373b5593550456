pub mod installed;

pub use installed::find_installed_version;
