pub mod blog_post;
pub mod category;
pub mod inquiry;
pub mod project;
pub mod project_image;
pub mod role;
pub mod session;
pub mod user;
