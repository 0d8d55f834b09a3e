#[cfg(test)]
mod tests {
    use crate::client::TaskClient;
    use crate::error::NetworkError;
    use crate::model::{Cost, Direction, NewTask, Task, TaskId};
    use crate::view::form::FormField;
    use crate::view::task_list::{Command, EditMode, Outcome, TaskListView, DELETE_FAILED, LOAD_FAILED, SAVE_FAILED};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use reqwest::{Method, StatusCode};
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;

    /// In-memory backend with the same contract as the REST one.
    #[derive(Default)]
    struct FakeBackend {
        tasks: Mutex<Vec<Task>>,
        next_id: AtomicU64,
        offline: AtomicBool,
        created: Mutex<Vec<NewTask>>,
    }

    impl FakeBackend {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            let backend = Self::default();
            backend.next_id.store(tasks.len() as u64 + 1, Ordering::SeqCst);
            *backend.tasks.lock().unwrap() = tasks;
            backend
        }

        fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn check(&self, method: Method) -> Result<(), NetworkError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(failure(method, StatusCode::SERVICE_UNAVAILABLE));
            }
            Ok(())
        }
    }

    fn failure(method: Method, status: StatusCode) -> NetworkError {
        NetworkError::Status {
            method,
            url: "memory://tarefas".to_string(),
            status,
        }
    }

    #[async_trait]
    impl TaskClient for FakeBackend {
        async fn list(&self) -> Result<Vec<Task>, NetworkError> {
            self.check(Method::GET)?;
            Ok(self.tasks.lock().unwrap().clone())
        }

        async fn create(&self, task: &NewTask) -> Result<(), NetworkError> {
            self.check(Method::POST)?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.created.lock().unwrap().push(task.clone());
            self.tasks.lock().unwrap().push(Task {
                id: TaskId::new(id.to_string()),
                name: task.name.clone(),
                cost: task.cost,
                due_date: task.due_date,
            });
            Ok(())
        }

        async fn update(&self, id: &TaskId, task: &NewTask) -> Result<(), NetworkError> {
            self.check(Method::PUT)?;
            let mut tasks = self.tasks.lock().unwrap();
            let existing = tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| failure(Method::PUT, StatusCode::NOT_FOUND))?;
            existing.name = task.name.clone();
            existing.cost = task.cost;
            existing.due_date = task.due_date;
            Ok(())
        }

        async fn delete(&self, id: &TaskId) -> Result<(), NetworkError> {
            self.check(Method::DELETE)?;
            let mut tasks = self.tasks.lock().unwrap();
            let before = tasks.len();
            tasks.retain(|t| &t.id != id);
            if tasks.len() == before {
                return Err(failure(Method::DELETE, StatusCode::NOT_FOUND));
            }
            Ok(())
        }

        async fn reorder(&self, id: &TaskId, direction: Direction) -> Result<(), NetworkError> {
            self.check(Method::PATCH)?;
            let mut tasks = self.tasks.lock().unwrap();
            let pos = tasks
                .iter()
                .position(|t| &t.id == id)
                .ok_or_else(|| failure(Method::PATCH, StatusCode::NOT_FOUND))?;
            match direction {
                Direction::Up if pos > 0 => tasks.swap(pos, pos - 1),
                Direction::Down if pos + 1 < tasks.len() => tasks.swap(pos, pos + 1),
                _ => {}
            }
            Ok(())
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, name: &str, cents: u64) -> Task {
        Task {
            id: TaskId::new(id),
            name: name.to_string(),
            cost: Cost::from_cents(cents),
            due_date: ymd(2024, 3, 1),
        }
    }

    fn fill_form(view: &mut TaskListView, name: &str, cost: &str, due: &str) {
        let form = view.form_mut();
        form.set(FormField::Name, name);
        form.set(FormField::Cost, cost);
        form.set(FormField::DueDate, due);
    }

    async fn loaded_view(backend: &FakeBackend) -> TaskListView {
        let mut view = TaskListView::new();
        let load = view.load();
        view.perform(backend, load).await;
        view
    }

    #[tokio::test]
    async fn test_load_replaces_tasks() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050), task("2", "Gym", 8_000)]);
        let view = loaded_view(&backend).await;

        assert_eq!(view.tasks().len(), 2);
        assert_eq!(view.last_error(), None);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_stale_tasks() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050)]);
        let mut view = loaded_view(&backend).await;

        backend.go_offline();
        view.perform(&backend, Command::Load).await;

        assert_eq!(view.last_error(), Some(LOAD_FAILED));
        assert!(!view.last_error().unwrap().is_empty());
        assert_eq!(view.tasks(), &[task("1", "Rent", 120_050)]);
    }

    #[tokio::test]
    async fn test_submit_creates_canonical_payload() {
        let backend = FakeBackend::default();
        let mut view = loaded_view(&backend).await;

        view.form_mut().name = "Pay rent".to_string();
        view.form_mut().cost = "1.200,50".to_string();
        view.form_mut().due_date = "2024-03-01".to_string();

        let command = view.submit().unwrap();
        assert_eq!(
            command,
            Command::Create(NewTask::new("Pay rent", Cost::from_cents(120_050), ymd(2024, 3, 1)))
        );
        view.perform(&backend, command).await;

        let created = backend.created.lock().unwrap().clone();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].cost.to_f64(), 1200.50);

        assert_eq!(view.tasks().len(), 1);
        assert_eq!(view.tasks()[0].name, "Pay rent");
        assert!(view.form().is_empty());
        assert_eq!(view.mode(), &EditMode::Creating);
    }

    #[tokio::test]
    async fn test_incomplete_form_sends_nothing() {
        let backend = FakeBackend::default();
        let mut view = loaded_view(&backend).await;

        fill_form(&mut view, "Rent", "", "2024-03-01");
        assert_eq!(view.submit(), None);
        assert_eq!(view.last_error(), Some("Cost is required."));
        assert_eq!(view.form().name, "Rent");
        assert!(backend.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_then_submit_updates_in_place() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050), task("2", "Gym", 8_000)]);
        let mut view = loaded_view(&backend).await;

        let gym = view.tasks()[1].clone();
        view.begin_edit(&gym);
        assert_eq!(view.mode(), &EditMode::Editing(TaskId::new("2")));
        assert_eq!(view.form().cost, "80,00");

        view.form_mut().set(FormField::Name, "Gym membership");
        view.form_mut().set(FormField::Cost, "999,99");
        let command = view.submit().unwrap();
        assert!(matches!(command, Command::Update(ref id, _) if id.as_str() == "2"));
        view.perform(&backend, command).await;

        let matching: Vec<&Task> = view.tasks().iter().filter(|t| t.id.as_str() == "2").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].name, "Gym membership");
        assert_eq!(matching[0].cost, Cost::from_cents(99_999));
        assert!(!view.is_editing());
        assert!(view.form().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_for_retry() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050)]);
        let mut view = loaded_view(&backend).await;

        let rent = view.tasks()[0].clone();
        view.begin_edit(&rent);
        backend.go_offline();

        let command = view.submit().unwrap();
        view.perform(&backend, command).await;

        assert_eq!(view.last_error(), Some(SAVE_FAILED));
        assert_eq!(view.form().name, "Rent");
        assert_eq!(view.editing_id(), Some(&TaskId::new("1")));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050), task("2", "Gym", 8_000)]);
        let mut view = loaded_view(&backend).await;

        view.request_delete(TaskId::new("1"));
        view.dismiss_delete();
        assert_eq!(view.confirm_delete(), None);

        view.request_delete(TaskId::new("1"));
        let command = view.confirm_delete().unwrap();
        view.perform(&backend, command).await;

        assert!(view.task(&TaskId::new("1")).is_none());
        assert_eq!(view.tasks().len(), 1);
        assert_eq!(view.pending_delete(), None);
    }

    #[tokio::test]
    async fn test_deleting_edited_task_resets_form() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050)]);
        let mut view = loaded_view(&backend).await;

        let rent = view.tasks()[0].clone();
        view.begin_edit(&rent);
        view.request_delete(rent.id.clone());
        let command = view.confirm_delete().unwrap();
        view.perform(&backend, command).await;

        assert_eq!(view.mode(), &EditMode::Creating);
        assert!(view.form().is_empty());
        assert!(view.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_unknown_task_reports_error() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050)]);
        let mut view = loaded_view(&backend).await;

        view.perform(&backend, Command::Delete(TaskId::new("77"))).await;
        assert_eq!(view.last_error(), Some(DELETE_FAILED));
        assert_eq!(view.tasks().len(), 1);
    }

    #[tokio::test]
    async fn test_reorder_reloads() {
        let backend = FakeBackend::with_tasks(vec![task("1", "Rent", 120_050), task("2", "Gym", 8_000)]);
        let mut view = loaded_view(&backend).await;

        let command = view.reorder(TaskId::new("2"), Direction::Up);
        view.perform(&backend, command).await;

        let order: Vec<&str> = view.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_successful_load_clears_error() {
        let backend = FakeBackend::default();
        let mut view = TaskListView::new();
        view.apply(Outcome::Loaded(Err(failure(Method::GET, StatusCode::BAD_GATEWAY))));
        assert_eq!(view.last_error(), Some(LOAD_FAILED));

        view.perform(&backend, Command::Load).await;
        assert_eq!(view.last_error(), None);
    }

    #[test]
    fn test_save_for_abandoned_edit_leaves_new_form_alone() {
        let mut view = TaskListView::new();
        let rent = task("1", "Rent", 120_050);
        let gym = task("2", "Gym", 8_000);

        view.begin_edit(&rent);
        let command = view.submit();
        assert!(command.is_some());

        // User switches to another task before the save lands.
        view.begin_edit(&gym);
        let next = view.apply(Outcome::Saved {
            updated: Some(rent.id.clone()),
            result: Ok(()),
        });

        assert_eq!(next, Some(Command::Load));
        assert_eq!(view.editing_id(), Some(&gym.id));
        assert_eq!(view.form().name, "Gym");
    }

    #[test]
    fn test_cancel_returns_to_creating() {
        let mut view = TaskListView::new();
        view.begin_edit(&task("1", "Rent", 120_050));
        view.cancel();
        assert_eq!(view.mode(), &EditMode::Creating);
        assert!(view.form().is_empty());
    }
}
