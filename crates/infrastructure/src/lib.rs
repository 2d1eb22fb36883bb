pub mod container;
pub mod dns;
