use chrono::NaiveDate;

use crate::currency::{format_cents, mask_cost_input, parse_cost};
use crate::error::FormError;
use crate::model::{NewTask, Task};
use crate::time::{parse_due_date, parse_due_date_from};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Cost,
    DueDate,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Cost, FormField::DueDate];

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Cost,
            FormField::Cost => FormField::DueDate,
            FormField::DueDate => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::DueDate,
            FormField::Cost => FormField::Name,
            FormField::DueDate => FormField::Cost,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Task name",
            FormField::Cost => "Cost (R$)",
            FormField::DueDate => "Due date",
        }
    }
}

/// The single form used both to add and to edit a task. Every field is kept
/// as the text the user sees; conversion happens on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub name: String,
    pub cost: String,
    pub due_date: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            cost: format_cents(task.cost.cents()),
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Cost => &self.cost,
            FormField::DueDate => &self.due_date,
        }
    }

    /// Replaces a field. The cost field goes through the currency mask.
    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::Cost => self.cost = mask_cost_input(value),
            FormField::DueDate => self.due_date = value.to_string(),
        }
    }

    pub fn push_char(&mut self, field: FormField, c: char) {
        let mut value = self.value(field).to_string();
        value.push(c);
        self.set(field, &value);
    }

    pub fn pop_char(&mut self, field: FormField) {
        let mut value = self.value(field).to_string();
        value.pop();
        self.set(field, &value);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.cost.is_empty() && self.due_date.is_empty()
    }

    /// Canonical values for the backend.
    pub fn to_new_task(&self) -> Result<NewTask, FormError> {
        let name = self.checked_name()?;
        Ok(NewTask::new(name, parse_cost(&self.cost)?, parse_due_date(&self.due_date)?))
    }

    pub fn to_new_task_on(&self, today: NaiveDate) -> Result<NewTask, FormError> {
        let name = self.checked_name()?;
        Ok(NewTask::new(name, parse_cost(&self.cost)?, parse_due_date_from(&self.due_date, today)?))
    }

    fn checked_name(&self) -> Result<&str, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        Ok(name)
    }
}
