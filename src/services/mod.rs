pub mod attendance_service;
pub mod calendar_service;
pub mod holiday_classifier;
pub mod holiday_provider;
pub mod holiday_service;
pub mod school_day_service;
pub mod stats_service;
