pub mod idea;
pub mod request;
