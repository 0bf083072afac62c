//! Domain models for dashboard-service.

pub mod customer;
pub mod invoice;
pub mod query_result;
pub mod revenue;
pub mod user;

pub use customer::Customer;
pub use invoice::{InvoiceAmount, InvoiceStatus, NewInvoice};
pub use query_result::{FieldDescription, QueryResult};
pub use revenue::Revenue;
pub use user::NewUser;
