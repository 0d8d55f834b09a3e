pub mod client;
pub mod config;
pub mod currency;
pub mod error;
pub mod input;
pub mod model;
pub mod time;
pub mod view;

pub use client::{HttpTaskClient, TaskClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use currency::{format_brl, format_cents, mask_cost_input, parse_cost};
pub use error::{ConfigError, FormError, InputError, NetworkError};
pub use input::{expand_key, parse_args, parse_task_args, ParsedInput};
pub use model::{Cost, Direction, NewTask, Task, TaskId};
pub use time::parse_due_date;
pub use view::{Command, EditMode, FormField, Outcome, TaskForm, TaskListView};
