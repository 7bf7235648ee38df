mod gal_file;

pub use gal_file::*;
