pub mod auth;
pub mod response;

pub use auth::{check_role, require_admin, ADMIN_ROLE, ROLE_HEADER};
pub use response::{ApiResponse, ApiResult};
