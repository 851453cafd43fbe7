mod task;

pub use task::{sample_tasks, Status, Task};
