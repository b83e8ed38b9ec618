pub mod attendance;
pub mod chat;
pub mod core;
pub mod marks;
pub mod navigation;
pub mod profile;
pub mod settings;
pub mod syllabus;
