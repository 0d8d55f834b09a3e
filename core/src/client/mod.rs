pub mod http;
pub mod traits;
pub mod wire;


pub use http::HttpTaskClient;
pub use traits::TaskClient;
