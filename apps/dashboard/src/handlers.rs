pub mod dashboard;
pub mod dev_storage;
pub mod forms;
pub mod health;
