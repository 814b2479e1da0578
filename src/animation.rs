pub mod options;
pub mod params;
pub mod timeline;
