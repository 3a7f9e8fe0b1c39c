pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod seed_repo;
pub use seed_repo::SeedRepository;
