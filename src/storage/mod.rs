pub mod models;
pub mod s3;
pub mod store;
pub mod transfer;

#[cfg(test)]
pub mod memory;
