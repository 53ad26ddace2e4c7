pub mod navigation;
pub mod pages;
pub mod router;
