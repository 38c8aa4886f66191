pub mod api;
pub mod dashboard;
pub mod index;
pub mod sign_in;
