pub mod report_service;
pub mod signal_publisher;

pub use report_service::ReportService;
pub use signal_publisher::SignalPublisher;
