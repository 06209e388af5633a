pub mod error;
pub mod transport;
pub mod session_service;
pub mod api_client;

pub use error::{ApiError, ErrorInfo};
pub use transport::{BrowserTransport, FormField, HttpRequest, HttpResponse, Method, RequestBody, Transport};
pub use session_service::SessionHolder;
pub use api_client::{ApiClient, DocumentQuery, RequestOptions};
