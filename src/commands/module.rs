//! Module Commands

use serde::Serialize;

use lesson_order::OrderResult;

use super::{api_url, decode, transport};
use crate::models::{Module, ModuleSummary};

#[derive(Serialize)]
struct CreateModuleArgs<'a> {
    title: &'a str,
}

pub async fn list_modules() -> OrderResult<Vec<ModuleSummary>> {
    let response = reqwest::get(api_url("/modules")).await.map_err(transport)?;
    decode(response).await
}

pub async fn create_module(title: &str) -> OrderResult<Module> {
    let response = reqwest::Client::new()
        .post(api_url("/modules"))
        .json(&CreateModuleArgs { title })
        .send()
        .await
        .map_err(transport)?;
    decode(response).await
}
