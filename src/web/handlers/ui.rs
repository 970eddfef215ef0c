use axum::response::{Html, IntoResponse};

use crate::web::static_files::get_embedded_file;

// Main UI entry point - the chat client page
pub async fn index_handler() -> impl IntoResponse {
    match get_embedded_file("index.html") {
        Some(content) => Html(content).into_response(),
        None => Html(
            "<html><body><h1>titanic-chat</h1><p>Error: index.html not found</p></body></html>",
        )
        .into_response(),
    }
}
