pub mod booking;
pub mod catalog;
pub mod dashboard;
pub mod identity;
pub mod notice;
pub mod review;
pub mod slot;
