use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Method, RequestBuilder, Response};
use url::Url;

use crate::client::traits::TaskClient;
use crate::client::wire::{decode_tasks, MovePayload, TaskPayload};
use crate::config::ClientConfig;
use crate::error::NetworkError;
use crate::model::{Direction, NewTask, Task, TaskId};

const RESOURCE: &str = "tarefas";
const MOVE_ACTION: &str = "mover";

/// [`TaskClient`] over the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpTaskClient {
    http: reqwest::Client,
    tasks_url: Url,
}

impl HttpTaskClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_http(config, reqwest::Client::new())
    }

    pub fn with_http(config: &ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            tasks_url: join_segments(config.base_url(), &[RESOURCE]),
        }
    }

    /// `<base>/tarefas`
    pub fn tasks_url(&self) -> &Url {
        &self.tasks_url
    }

    fn task_url(&self, id: &TaskId) -> Url {
        join_segments(&self.tasks_url, &[id.as_str()])
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.http.request(method, url.clone())
    }

    async fn send(&self, method: Method, url: &Url, request: RequestBuilder) -> Result<Response, NetworkError> {
        let response = request.send().await.map_err(|source| NetworkError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, NetworkError> {
        let url = &self.tasks_url;
        let response = self.send(Method::GET, url, self.request(Method::GET, url)).await?;
        let body = response.text().await.map_err(|source| NetworkError::Transport {
            method: Method::GET,
            url: url.to_string(),
            source,
        })?;
        decode_tasks(&body).map_err(|reason| NetworkError::Decode {
            url: url.to_string(),
            reason,
        })
    }
}

#[async_trait]
impl TaskClient for HttpTaskClient {
    async fn list(&self) -> Result<Vec<Task>, NetworkError> {
        self.fetch_tasks()
            .await
            .inspect_err(|e| error!("Error fetching tasks: {}", e))
    }

    async fn create(&self, task: &NewTask) -> Result<(), NetworkError> {
        let url = &self.tasks_url;
        let request = self.request(Method::POST, url).json(&TaskPayload::from(task));
        self.send(Method::POST, url, request)
            .await
            .map(|_| ())
            .inspect_err(|e| error!("Error adding task: {}", e))
    }

    async fn update(&self, id: &TaskId, task: &NewTask) -> Result<(), NetworkError> {
        let url = self.task_url(id);
        let request = self.request(Method::PUT, &url).json(&TaskPayload::from(task));
        self.send(Method::PUT, &url, request)
            .await
            .map(|_| ())
            .inspect_err(|e| error!("Error updating task {}: {}", id, e))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), NetworkError> {
        let url = self.task_url(id);
        let request = self.request(Method::DELETE, &url);
        self.send(Method::DELETE, &url, request)
            .await
            .map(|_| ())
            .inspect_err(|e| error!("Error deleting task {}: {}", id, e))
    }

    async fn reorder(&self, id: &TaskId, direction: Direction) -> Result<(), NetworkError> {
        let url = join_segments(&self.task_url(id), &[MOVE_ACTION]);
        let request = self
            .request(Method::PATCH, &url)
            .json(&MovePayload { direcao: direction });
        self.send(Method::PATCH, &url, request)
            .await
            .map(|_| ())
            .inspect_err(|e| error!("Error moving task {} {}: {}", id, direction.as_str(), e))
    }
}

/// Appends path segments, percent-encoding each one. `ClientConfig` only
/// admits hierarchical URLs, so the segment list is always available.
fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
