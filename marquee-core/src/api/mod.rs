//! API-facing facade (route constants and transport DTOs).

pub mod routes;
pub mod types;
