pub mod chart_service;
pub mod gradient_service;
pub mod options_service;
pub mod render_service;
pub mod timeline_service;
