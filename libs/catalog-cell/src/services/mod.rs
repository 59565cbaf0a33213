pub mod product;
pub mod voucher;

pub use product::ProductCatalogService;
pub use voucher::VoucherService;
