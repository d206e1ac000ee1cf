pub mod authors;
pub mod blogs;
pub mod cover_images;
pub mod requester;
pub mod tags;
pub mod user_profiles;

pub mod prelude {
    pub use crate::authors::Author;
    pub use crate::blogs::Blog;
    pub use crate::cover_images::CoverImage;
    pub use crate::requester::Requester;
    pub use crate::tags::Tag;
    pub use crate::user_profiles::UserProfile;
}
