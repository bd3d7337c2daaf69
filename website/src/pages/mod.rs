mod blog;
mod cover_letter;
mod index;
mod resume;

pub use blog::{BlogIndex, BlogPost, BlogPostParams};
pub use cover_letter::CoverLetter;
pub use index::Index;
pub use resume::Resume;
