pub mod individual;
pub mod mass;
