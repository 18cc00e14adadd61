pub mod availability;
pub mod timeline;
