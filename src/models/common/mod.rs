pub mod error_code;
pub mod pagination;
pub mod query;
pub mod response;
pub mod scope;

pub use error_code::ErrorCode;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::{ApiResponse, ValidationDetail};
pub use scope::{AccessScope, ScopeKind};
