pub mod facts;
pub mod requests;
pub mod responses;
