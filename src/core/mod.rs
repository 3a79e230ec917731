pub mod builder;
pub mod errors;
pub mod event;
pub mod event_queue;
pub mod execution;
pub mod manager;
pub mod observer;
pub mod resource;
pub mod system;
pub mod types;
