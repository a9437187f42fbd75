//! Async access to the `/todos` HTTP surface.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use log::debug;
use reqwest::{Response, Url};
use todolist_core::{Todo, TodoId, TodoInput};

/// Default API location used by the terminal client.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// The four collection operations as seen from a client.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Todo>>;
    async fn create(&self, input: &TodoInput) -> ClientResult<Todo>;
    async fn update(&self, id: TodoId, input: &TodoInput) -> ClientResult<Todo>;
    /// Succeeds on any 2xx; the confirmation body is not read.
    async fn delete(&self, id: TodoId) -> ClientResult<()>;
}

/// reqwest-backed [`TodoApi`].
#[derive(Debug, Clone)]
pub struct TodoApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TodoApiClient {
    /// Creates a client for the service at `base_url`, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing connection pool.
    pub fn with_http(http: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/"))
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn todos_url(&self) -> ClientResult<Url> {
        self.join("todos")
    }

    fn todo_url(&self, id: TodoId) -> ClientResult<Url> {
        self.join(&format!("todos/{id}"))
    }

    fn join(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))
    }
}

fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ClientError::Status {
        status: status.as_u16(),
    })
}

#[async_trait]
impl TodoApi for TodoApiClient {
    async fn list(&self) -> ClientResult<Vec<Todo>> {
        let response = self.http.get(self.todos_url()?).send().await?;
        let todos = ensure_success(response)?.json::<Vec<Todo>>().await?;
        debug!("event=api_list module=client status=ok count={}", todos.len());
        Ok(todos)
    }

    async fn create(&self, input: &TodoInput) -> ClientResult<Todo> {
        let response = self.http.post(self.todos_url()?).json(input).send().await?;
        Ok(ensure_success(response)?.json::<Todo>().await?)
    }

    async fn update(&self, id: TodoId, input: &TodoInput) -> ClientResult<Todo> {
        let response = self.http.put(self.todo_url(id)?).json(input).send().await?;
        Ok(ensure_success(response)?.json::<Todo>().await?)
    }

    async fn delete(&self, id: TodoId) -> ClientResult<()> {
        let response = self.http.delete(self.todo_url(id)?).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized_with_trailing_slash() {
        let client = TodoApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");

        let client = TodoApiClient::new("http://example.test/api//").unwrap();
        assert_eq!(
            client.todos_url().unwrap().as_str(),
            "http://example.test/api/todos"
        );
    }

    #[test]
    fn todo_url_embeds_id() {
        let client = TodoApiClient::new(DEFAULT_API_URL).unwrap();
        let id = TodoId::nil();
        assert_eq!(
            client.todo_url(id).unwrap().as_str(),
            "http://localhost:8000/todos/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn rejects_non_http_base_urls() {
        assert!(matches!(
            TodoApiClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            TodoApiClient::new("ftp://example.test"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
