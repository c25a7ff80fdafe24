//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blog_category_repo;
pub mod blog_post_repo;
pub mod inquiry_repo;
pub mod portfolio_category_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use blog_category_repo::BlogCategoryRepo;
pub use blog_post_repo::BlogPostRepo;
pub use inquiry_repo::InquiryRepo;
pub use portfolio_category_repo::PortfolioCategoryRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
