pub mod post_service;
pub mod search;
