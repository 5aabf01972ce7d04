pub mod archive;
pub mod config;
pub mod migrate;
pub mod remote;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
