// ABOUTME: Route module binding URL paths to template-rendering handlers
// ABOUTME: Routing itself is axum's job, this layer only adapts handlers and templates

pub mod binding;
pub mod error;
pub mod preview;
pub mod request;
pub mod router;

pub use binding::{RouteBinding, TemplateRoute};
pub use error::{Result as RouteResult, RouteError};
pub use preview::PreviewRoute;
pub use request::{RouteRequest, RouteResponse};
pub use router::TemplateRouter;
