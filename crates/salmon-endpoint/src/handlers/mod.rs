pub mod options;
pub mod post;
