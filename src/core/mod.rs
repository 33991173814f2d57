pub mod action;
pub mod chat;
pub mod config;
pub mod identity;
pub mod live;
pub mod state;
pub mod stats;
pub mod timeago;
pub mod training;
pub mod view;
