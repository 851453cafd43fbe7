/// Lifecycle stage of a task. Doubles as the identity of the column holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Column header shown on the board
    pub fn title(&self) -> &'static str {
        match self {
            Status::Todo => "To do",
            Status::Doing => "In progress",
            Status::Done => "Done",
        }
    }

    /// Board columns, left to right
    pub fn columns() -> &'static [Status] {
        &[Status::Todo, Status::Doing, Status::Done]
    }

    /// Position of this status in [`Status::columns`]
    pub fn index(&self) -> usize {
        match self {
            Status::Todo => 0,
            Status::Doing => 1,
            Status::Done => 2,
        }
    }

    /// Cyclic successor: Done wraps around to Todo
    pub fn next(self) -> Self {
        match self {
            Status::Todo => Status::Doing,
            Status::Doing => Status::Done,
            Status::Done => Status::Todo,
        }
    }

    /// Cyclic predecessor: Todo wraps around to Done
    pub fn prev(self) -> Self {
        match self {
            Status::Todo => Status::Done,
            Status::Doing => Status::Todo,
            Status::Done => Status::Doing,
        }
    }
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub status: Status,
    pub title: String,
    pub description: String,
}

impl Task {
    pub fn new(status: Status, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Consume the task and return it one stage further along.
    pub fn advance(mut self) -> Self {
        self.status = self.status.next();
        self
    }
}

/// Tasks the board is seeded with on startup
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(Status::Todo, "Do coffee", "Make delicious coffee"),
        Task::new(Status::Todo, "Buy milk", "Buy white milk 3.2% fat"),
        Task::new(Status::Todo, "Buy bread", "White fresh bread"),
        Task::new(Status::Doing, "Clean house", "We will have a guest soon"),
        Task::new(Status::Doing, "Feed dog", "doggo woof woof"),
        Task::new(Status::Done, "Feed rabbit", "Bunny bunny"),
    ]
}
