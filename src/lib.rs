//! Host-side surfaces around the `pagemark_core` search engine: the search
//! overlay, its JSON command bridge, an HTML loader, configuration and the
//! command-line front end.

pub mod cli;
pub mod command;
pub mod config;
pub mod html;
pub mod logging;
pub mod overlay;
