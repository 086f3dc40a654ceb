pub mod config;
pub mod mapping_view;
pub mod standard_sizes;
pub mod text_descriptor;
