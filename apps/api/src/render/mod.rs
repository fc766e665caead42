pub mod pdf;
pub mod template;
