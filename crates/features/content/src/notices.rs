//! Ticker notices.

use crate::collection::{Collection, active_by_default, collection_routes, required};
use chrono::{DateTime, Utc};
use lobby_derive::api_model;
use lobby_domain::constants::{NOTICE_TABLE, NOTICE_TAG};
use std::borrow::Cow;

#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: String,
    pub message: String,
    pub link_url: String,
    pub position: i32,
    pub is_active: bool,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

#[api_model]
#[derive(Clone)]
pub struct NoticeInput {
    pub message: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl Collection for Notice {
    type Input = NoticeInput;

    const TABLE: &'static str = NOTICE_TABLE;
    const NOUN: &'static str = "Notice";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn check(input: &NoticeInput) -> Result<(), Cow<'static, str>> {
        required("message", &input.message)
    }

    fn assemble(id: String, input: NoticeInput, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            message: input.message.trim().to_owned(),
            link_url: input.link_url,
            position: input.position,
            is_active: input.is_active,
            created_at,
            updated_at,
        }
    }
}

collection_routes! {
    name = notices;
    item = Notice, input = NoticeInput;
    tag = NOTICE_TAG;
    paths = "/notices", "/notices/{id}";
}

/// Routes of this collection.
pub fn router() -> ::utoipa_axum::router::OpenApiRouter<::lobby_kernel::server::ApiState> {
    crud_router()
}
