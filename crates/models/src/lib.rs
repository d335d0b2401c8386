pub mod errors;
pub mod db;
pub mod service_category;
pub mod service;

#[cfg(test)]
mod tests;
