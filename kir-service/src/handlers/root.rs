use crate::dtos::MessageResponse;
use axum::Json;

pub async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Backend KIR aktif"))
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Halo dari backend API!"))
}
