pub mod estimation;
pub mod file_formats;
pub mod industry;
pub mod material;
pub mod user;
