pub mod upload;

pub use upload::MediaService;
