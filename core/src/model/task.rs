use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::cost::Cost;

/// Costs at or above this amount are highlighted in task lists.
pub const HIGHLIGHT_THRESHOLD: Cost = Cost::from_cents(100_000);

/// Backend-assigned identifier. Some backends hand out integers, others
/// strings; either way it is only ever echoed back in request paths.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        TaskId::new(id)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            UInt(u64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => TaskId(n.to_string()),
            RawId::UInt(n) => TaskId(n.to_string()),
            // 3.0 is the same row as 3
            RawId::Float(f) if f.fract() == 0.0 => TaskId(format!("{:.0}", f)),
            RawId::Float(f) => TaskId(f.to_string()),
            RawId::Text(s) => TaskId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub cost: Cost,
    pub due_date: NaiveDate,
}

impl Task {
    pub fn is_highlighted(&self) -> bool {
        self.cost >= HIGHLIGHT_THRESHOLD
    }

    pub fn fields(&self) -> NewTask {
        NewTask {
            name: self.name.clone(),
            cost: self.cost,
            due_date: self.due_date,
        }
    }
}

/// A task's editable fields, as sent on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub cost: Cost,
    pub due_date: NaiveDate,
}

impl NewTask {
    pub fn new(name: impl Into<String>, cost: Cost, due_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            cost,
            due_date,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: '{}' (expected up or down)", s)),
        }
    }
}
