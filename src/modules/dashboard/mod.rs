pub mod controller;
pub mod pages;
pub mod router;
pub mod service;
