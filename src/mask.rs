pub mod contour;
pub mod raster;
