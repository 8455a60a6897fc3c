// Business logic services

pub mod trainer_matcher;
pub mod attendance_streak;
pub mod member_service;
pub mod trainer_service;
pub mod match_request_service;
pub mod attendance_service;
pub mod background_job_service;

pub use member_service::MemberService;
pub use trainer_service::TrainerService;
pub use match_request_service::MatchRequestService;
pub use attendance_service::AttendanceService;
pub use background_job_service::BackgroundJobService;
