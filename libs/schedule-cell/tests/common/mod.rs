use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use schedule_cell::error::ScheduleError;
use schedule_cell::models::{
    NewScheduleException, NewScheduleTemplate, ScheduleException, ScheduleTemplate,
};
use schedule_cell::store::{ExceptionStore, ScheduleTemplateStore};

/// Vec-backed template store. With `fail_after`, `insert_batch` aborts
/// once that many rows are staged and commits nothing, which is how the
/// all-or-nothing contract gets exercised.
pub struct InMemoryTemplateStore {
    rows: Mutex<Vec<ScheduleTemplate>>,
    fail_after: Option<usize>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_after: None,
        }
    }

    pub fn failing_after(rows: usize) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_after: Some(rows),
        }
    }
}

#[async_trait]
impl ScheduleTemplateStore for InMemoryTemplateStore {
    async fn insert_batch(
        &self,
        rows: Vec<NewScheduleTemplate>,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        let mut staged = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            if self.fail_after.is_some_and(|limit| index >= limit) {
                return Err(ScheduleError::Storage(
                    "simulated insert failure".to_string(),
                ));
            }

            staged.push(ScheduleTemplate {
                id: Uuid::new_v4(),
                professional_id: row.professional_id,
                weekday: row.weekday,
                start_time: row.start_time,
                end_time: row.end_time,
                valid_from: row.valid_from,
                valid_until: row.valid_until,
                attention_type_id: row.attention_type_id,
                consultation_number: row.consultation_number,
                created_at: row.created_at,
            });
        }

        self.rows.lock().unwrap().extend(staged.iter().cloned());
        Ok(staged)
    }

    async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        let mut rows: Vec<ScheduleTemplate> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.professional_id == professional_id)
            .cloned()
            .collect();

        // stable sort keeps insertion order within a weekday
        rows.sort_by_key(|r| r.weekday);
        Ok(rows)
    }

    async fn list_for_weekday(
        &self,
        professional_id: Uuid,
        weekday: i32,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleTemplate>, ScheduleError> {
        let mut rows: Vec<ScheduleTemplate> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.professional_id == professional_id
                    && r.weekday == weekday
                    && r.valid_from <= date
                    && date <= r.valid_until
            })
            .cloned()
            .collect();

        // newest first, like the production query
        rows.reverse();
        Ok(rows)
    }
}

pub struct InMemoryExceptionStore {
    rows: Mutex<Vec<ScheduleException>>,
}

impl InMemoryExceptionStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ExceptionStore for InMemoryExceptionStore {
    async fn insert(
        &self,
        row: NewScheduleException,
    ) -> Result<ScheduleException, ScheduleError> {
        let created = ScheduleException {
            id: Uuid::new_v4(),
            professional_id: row.professional_id,
            date: row.date,
            status: row.status,
            start_time: row.start_time,
            end_time: row.end_time,
            reason: row.reason,
            consultation_number: row.consultation_number,
            created_at: row.created_at,
        };

        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ScheduleException>, ScheduleError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.professional_id == professional_id)
            .cloned()
            .collect())
    }

    async fn list_for_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleException>, ScheduleError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.professional_id == professional_id && r.date == date)
            .cloned()
            .collect())
    }
}
