mod comic_repo;
mod session_repo;
mod user_repo;

pub use comic_repo::ComicRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
