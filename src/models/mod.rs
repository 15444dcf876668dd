pub mod application;
pub mod job;
pub mod user;

pub use application::{Application, ApplicationInput, ApplicationStatus, StatusUpdate};
pub use job::{EmploymentType, Job, JobInput, JobQuery, JobUpdate};
pub use user::{Actor, Credentials, NewUser, Role, User};
