pub mod connection;
pub mod games;
