pub mod core;
pub mod csv_provider;
pub mod factory;
pub mod mock;
pub mod yahoo;

pub use csv_provider::CsvPriceDataProvider;
pub use factory::ServiceFactory;
pub use mock::MockPriceDataProvider;
pub use yahoo::YahooPriceDataProvider;
