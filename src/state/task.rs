//! Task entity and the ordered in-memory store.
//!
//! Tasks are kept in insertion order, which is also display order. Ids come
//! from a counter owned by the store and are never handed out twice, even
//! after the task holding an id has been cancelled.

use super::error::StateError;
use crate::device::ImageRef;
use chrono::NaiveDate;

/// Defines task data structure.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub image: Option<ImageRef>,
}

/// Fields required to create a task, usually taken from the draft form.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub image: Option<ImageRef>,
}

/// Ordered collection of committed tasks.
///
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: vec![],
            next_id: 1,
        }
    }
}

impl TaskStore {
    /// Append a new task built from the given fields. Rejects titles that are
    /// empty once surrounding whitespace is removed.
    ///
    pub fn add(&mut self, new_task: NewTask) -> Result<&Task, StateError> {
        if new_task.title.trim().is_empty() {
            return Err(StateError::EmptyTitle);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            title: new_task.title,
            description: new_task.description,
            date: new_task.date,
            completed: false,
            image: new_task.image,
        });
        self.tasks.last().ok_or(StateError::TaskNotFound { id })
    }

    /// Mark the matching task as completed. Returns whether anything changed.
    ///
    pub fn complete(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) if !task.completed => {
                task.completed = true;
                true
            }
            _ => false,
        }
    }

    /// Remove the matching task. Returns whether a task was removed.
    ///
    pub fn cancel(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
