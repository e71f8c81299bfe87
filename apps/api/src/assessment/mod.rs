// Career assessment wizard
// Schemas and step views are pure; the wizard owns the aggregate record;
// sessions and the completion sink are the only stateful/side-effecting parts.

pub mod gate;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod schema;
pub mod sessions;
pub mod sink;
pub mod steps;
pub mod wizard;
