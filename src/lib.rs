pub mod archive;
pub mod cli;
pub mod core;
pub mod format;
pub mod meetup;
pub mod render;
