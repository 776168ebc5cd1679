//! Lesson Commands
//!
//! `HttpLessonApi` is the coordinator's ListSource and RemoteOrderStore;
//! the free functions cover lesson creation and deletion.

use async_trait::async_trait;
use serde::Serialize;

use lesson_order::{ListSource, ModuleId, ModuleLessons, OrderResult, RemoteOrderStore, ReorderRequest};

use super::{api_url, decode, expect_success, transport};
use crate::models::Lesson;

#[derive(Serialize)]
struct CreateLessonArgs<'a> {
    title: &'a str,
}

/// Lesson endpoints over HTTP
#[derive(Clone, Debug, Default)]
pub struct HttpLessonApi {
    client: reqwest::Client,
}

#[async_trait(?Send)]
impl ListSource for HttpLessonApi {
    async fn fetch_lessons(&self, module_id: ModuleId) -> OrderResult<ModuleLessons> {
        let url = api_url(&format!("/modules/{}/lessons", module_id.0));
        log::trace!("fetch_lessons: {}", url);
        let response = self.client.get(&url).send().await.map_err(transport)?;
        decode(response).await
    }
}

#[async_trait(?Send)]
impl RemoteOrderStore for HttpLessonApi {
    async fn save_order(&self, module_id: ModuleId, request: &ReorderRequest) -> OrderResult<ModuleLessons> {
        let url = api_url(&format!("/modules/{}/lessons/order", module_id.0));
        log::trace!("save_order: {} ({} entries)", url, request.order.len());
        let response = self.client.put(&url).json(request).send().await.map_err(transport)?;
        decode(response).await
    }
}

pub async fn create_lesson(module_id: u32, title: &str) -> OrderResult<Lesson> {
    let url = api_url(&format!("/modules/{}/lessons", module_id));
    let response = reqwest::Client::new()
        .post(&url)
        .json(&CreateLessonArgs { title })
        .send()
        .await
        .map_err(transport)?;
    decode(response).await
}

pub async fn delete_lesson(lesson_id: u32) -> OrderResult<()> {
    let url = api_url(&format!("/lessons/{}", lesson_id));
    let response = reqwest::Client::new().delete(&url).send().await.map_err(transport)?;
    expect_success(response).await
}
