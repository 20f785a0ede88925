pub mod attendance_repository;
pub mod holiday_repository;
pub mod student_repository;
