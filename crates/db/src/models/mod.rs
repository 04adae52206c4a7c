pub mod comic;
pub mod session;
pub mod user;
