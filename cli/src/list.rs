use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tasklist_core::{format_brl, Cost, Task};

const HIGHLIGHT_MARK: &str = "!";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = " ")]
    mark: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Due")]
    due: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            mark: if task.is_highlighted() { HIGHLIGHT_MARK } else { "" },
            id: task.id.to_string(),
            name: task.name.clone(),
            cost: format_brl(task.cost),
            due: task.due_date.format("%Y-%m-%d").to_string(),
        }
    }
}

pub fn total_cost(tasks: &[Task]) -> Cost {
    Cost::from_cents(tasks.iter().fold(0u64, |sum, t| sum.saturating_add(t.cost.cents())))
}

pub fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    println!("{}", table);
    println!("{} tasks, total {}  ({} = cost of R$ 1.000,00 or more)", tasks.len(), format_brl(total_cost(tasks)), HIGHLIGHT_MARK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tasklist_core::TaskId;

    fn task(cents: u64) -> Task {
        Task {
            id: TaskId::new("1"),
            name: "Rent".to_string(),
            cost: Cost::from_cents(cents),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_row_marks_expensive_tasks() {
        assert_eq!(TaskRow::from(&task(100_000)).mark, HIGHLIGHT_MARK);
        assert_eq!(TaskRow::from(&task(99_999)).mark, "");
        assert_eq!(TaskRow::from(&task(150_000)).cost, "R$ 1.500,00");
    }

    #[test]
    fn test_total_cost() {
        assert_eq!(total_cost(&[task(100), task(250)]), Cost::from_cents(350));
        assert_eq!(total_cost(&[]), Cost::ZERO);
    }
}
