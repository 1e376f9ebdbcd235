//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&Store` as the first argument. Every method is one scoped
//! connection and one parameterized statement.

pub mod blog_post_repo;

pub use blog_post_repo::BlogPostRepo;
