/// API route handlers
///
/// - `health`: Liveness and database connectivity

pub mod health;
