use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        chat::{ChatReplyDto, ChatRequestDto},
    },
    server::{error::Error, model::app::AppState, service::chat::ChatService},
};

pub static CHAT_TAG: &str = "chat";

/// Ask the platform assistant a question
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = CHAT_TAG,
    request_body = ChatRequestDto,
    responses(
        (status = 200, description = "The assistant's reply", body = ChatReplyDto),
        (status = 400, description = "Missing, blank or too long message", body = ErrorDto),
        (status = 500, description = "Assistant not configured or not answering", body = ErrorDto)
    ),
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let body = payload.ok().map(|Json(body)| body);
    let message = body.as_ref().and_then(|body| body.get("message"));

    let reply = ChatService::new(&state.http_client, &state.chat)
        .reply(message)
        .await?;

    Ok(Json(ChatReplyDto { reply }))
}
