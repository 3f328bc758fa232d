// User profiles and the reading dashboard.

pub mod handlers;
