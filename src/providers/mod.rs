pub mod mock;

pub use mock::MockDataSource;
