//! UniFi Access directory adapter.

mod api_types;
mod unifi_directory;

pub use unifi_directory::UnifiDirectory;
