pub mod album;
pub mod artist;
pub mod song;
