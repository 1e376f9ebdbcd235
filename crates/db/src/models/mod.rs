//! Row structs and request DTOs.

pub mod blog_post;
