//! Session extractors.
//!
//! - [`session::SessionUser`] -- requires a live session; 401 JSON otherwise.
//! - [`session::PageUser`] -- requires a live session; redirects to `/login` otherwise.
//! - [`session::MaybeSession`] -- resolves the session if there is one.

pub mod session;
