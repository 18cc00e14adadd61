pub mod room;
pub mod booking;
pub mod blocking;
pub mod timeline;
