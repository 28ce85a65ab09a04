use uuid::Uuid;
use wellsoulix_storage::Task;

/// Micro-task list. Completing a task credits no stars.
#[derive(Debug, Clone, Default)]
pub struct MicroTasks {
    tasks: Vec<Task>,
}

impl MicroTasks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task; blank input is ignored
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.push(Task::new(text.to_string()));
        self.tasks.last()
    }

    /// Flip completion of the task with `id`. Returns false if no such task.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
