//! JSON shapes spoken by the task backend.
//!
//! The backend uses Portuguese field names (`nome`, `custo`, `data_limite`,
//! `direcao`). They stay in this module; everything above it sees [`Task`].

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Cost, Direction, NewTask, Task, TaskId};

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Deserialize, Debug, Clone)]
pub struct TaskRecord {
    pub id: TaskId,
    pub nome: String,
    pub custo: Cost,
    pub data_limite: String,
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        if record.nome.trim().is_empty() {
            return Err(format!("task {} has an empty name", record.id));
        }
        let due_date = parse_wire_date(&record.data_limite).ok_or_else(|| {
            format!("task {} has an unreadable due date '{}'", record.id, record.data_limite)
        })?;

        Ok(Task {
            id: record.id,
            name: record.nome,
            cost: record.custo,
            due_date,
        })
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct TaskPayload<'a> {
    pub nome: &'a str,
    pub custo: Cost,
    pub data_limite: String,
}

impl<'a> From<&'a NewTask> for TaskPayload<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            nome: &task.name,
            custo: task.cost,
            data_limite: task.due_date.format(WIRE_DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct MovePayload {
    pub direcao: Direction,
}

/// Decodes a `GET /tarefas` body. One bad record fails the whole list.
pub fn decode_tasks(body: &str) -> Result<Vec<Task>, String> {
    let records: Vec<TaskRecord> = serde_json::from_str(body).map_err(|e| e.to_string())?;
    records.into_iter().map(Task::try_from).collect()
}

/// Accepts `2024-03-01`, an ISO date-time (the date part is kept) or an
/// RFC 2822 date such as `Fri, 01 Mar 2024 00:00:00 GMT`.
pub fn parse_wire_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, WIRE_DATE_FORMAT) {
        return Some(d);
    }
    if let Some(prefix) = text.get(..10) {
        if matches!(text.as_bytes().get(10), Some(b'T') | Some(b' ')) {
            if let Ok(d) = NaiveDate::parse_from_str(prefix, WIRE_DATE_FORMAT) {
                return Some(d);
            }
        }
    }
    DateTime::parse_from_rfc2822(text).ok().map(|dt| dt.date_naive())
}
