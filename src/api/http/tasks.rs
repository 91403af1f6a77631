use serde_json::json;

use super::HttpApi;
use crate::api::query::TaskListQuery;
use crate::api::token::TokenStore;
use crate::api::{ApiResult, PaginatedResponse, TaskApi};
use crate::domain::task::{NewTask, Task, TaskStatus, UpdateTask};
use crate::domain::types::TaskId;

impl<S: TokenStore> TaskApi for HttpApi<S> {
    async fn create_task(&self, task: &NewTask) -> ApiResult<Task> {
        self.post_json("/tasks", task).await
    }

    async fn update_task(&self, id: TaskId, update: &UpdateTask) -> ApiResult<Task> {
        self.put_json(&format!("/tasks/{id}"), update).await
    }

    async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
        self.delete(&format!("/tasks/{id}")).await
    }

    async fn get_task(&self, id: TaskId) -> ApiResult<Task> {
        self.get(&format!("/tasks/{id}")).await
    }

    async fn list_tasks(&self, query: &TaskListQuery) -> ApiResult<PaginatedResponse<Task>> {
        self.get_page("/tasks", query.pagination, &query.filters)
            .await
    }

    async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> ApiResult<Task> {
        self.post_json(&format!("/tasks/{id}/status"), &json!({ "status": status }))
            .await
    }
}
