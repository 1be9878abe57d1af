//! This crate is responsible for managing processes spawned by
//! this tool. It contains the drivers that interface with
//! container runtimes like docker or podman to build the site
//! image and run the generator.

pub mod drivers;
