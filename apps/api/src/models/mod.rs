pub mod sections;
pub mod upload;
