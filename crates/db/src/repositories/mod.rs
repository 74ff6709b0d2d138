//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that apply domain
//! rules on top of SQL (transition guards, target validation, coverage)
//! return [`crate::RepoError`]; plain row access returns `sqlx::Error`.

pub mod drawing_repo;
pub mod graph_repo;
pub mod image_repo;
pub mod listing_repo;
pub mod product_dimension_repo;
pub mod product_repo;
pub mod product_specification_repo;
pub mod property_repo;
pub mod room_repo;
pub mod seller_profile_repo;
pub mod transaction_repo;
pub mod user_repo;
pub mod visibility_repo;

pub use drawing_repo::DrawingRepo;
pub use graph_repo::GraphRepo;
pub use image_repo::ImageRepo;
pub use listing_repo::ListingRepo;
pub use product_dimension_repo::ProductDimensionRepo;
pub use product_repo::ProductRepo;
pub use product_specification_repo::ProductSpecificationRepo;
pub use property_repo::PropertyRepo;
pub use room_repo::RoomRepo;
pub use seller_profile_repo::SellerProfileRepo;
pub use transaction_repo::TransactionRepo;
pub use user_repo::UserRepo;
pub use visibility_repo::VisibilityRepo;
