pub mod controller;
pub mod directory;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;
