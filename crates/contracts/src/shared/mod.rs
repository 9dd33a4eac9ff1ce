pub mod decode;
pub mod numeric;
pub mod pagination;
pub mod validation;

pub use decode::{decode_json, DecodeError, Validate};
pub use pagination::{ListPayload, PaginatedResponse, Pagination};
pub use validation::ValidationError;
