pub mod allocator;
pub mod controller;
pub mod router;
pub mod service;
