pub mod task;
pub mod user;

pub use task::{CreateTask, Task, TaskStatus, UpdateTask};
pub use user::{UpdateProfile, User, UserResponse};
