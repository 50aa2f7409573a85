//! sea-orm entities for the six salon tables.
//!
//! The `Column` enums generated here are the only writable-column schema the
//! generic statement builders ever see, so no request can smuggle in an
//! unexpected column name.

pub mod customer;
pub mod expense;
pub mod expense_type;
pub mod payment_method;
pub mod record;
pub mod service_item;
pub mod staff_member;

pub use payment_method::PaymentMethod;
