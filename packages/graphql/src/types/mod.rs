pub mod blog;
pub mod cover_image;
pub mod sort;
pub mod user_profile;
