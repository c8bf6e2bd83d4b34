pub mod asset;
pub mod camera;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layout;
pub mod loader;
pub mod picking;
pub mod selection;
pub mod session;
