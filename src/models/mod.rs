// Data models shared by services and handlers

pub mod goal_tag;
pub mod member;
pub mod trainer;
pub mod match_request;
pub mod attendance;
pub mod validation;

pub use goal_tag::*;
pub use member::*;
pub use trainer::*;
pub use match_request::*;
pub use attendance::*;
pub use validation::*;
