pub mod controller;
pub mod form;
pub mod list;
pub mod model;
pub mod pages;
pub mod query;
pub mod router;
pub mod service;
pub mod templates;
