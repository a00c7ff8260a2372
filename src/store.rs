//! In-memory collections for the three entity families. A single `RwLock`
//! guards all of them, so a lifecycle operation that touches two
//! collections (work-update submit) holds one write guard for the whole
//! unit and can never be observed half-applied. The persistence engine
//! behind this interface is a collaborator concern; swapping it out does
//! not change the services.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::model::{Attendance, Task, WorkUpdate};

#[derive(Default)]
pub(crate) struct Collections {
    pub tasks: HashMap<u64, Task>,
    pub attendance: HashMap<u64, Attendance>,
    pub updates: HashMap<u64, WorkUpdate>,
    next_id: u64,
}

impl Collections {
    /// One id sequence shared by every collection.
    pub fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// The record for (employee, day), whatever its status.
    pub fn attendance_for(&self, employee_id: u64, date: NaiveDate) -> Option<&Attendance> {
        self.attendance
            .values()
            .find(|a| a.employee_id == employee_id && a.date == date)
    }
}

#[derive(Default)]
pub struct Store {
    inner: RwLock<Collections>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn task(&self, id: u64) -> Option<Task> {
        self.read().tasks.get(&id).cloned()
    }

    pub fn attendance_record(&self, id: u64) -> Option<Attendance> {
        self.read().attendance.get(&id).cloned()
    }

    pub fn work_update(&self, id: u64) -> Option<WorkUpdate> {
        self.read().updates.get(&id).cloned()
    }
}
