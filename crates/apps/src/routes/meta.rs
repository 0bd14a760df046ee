//! `GET /live/_meta`.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::apps::{AppEntry, installed_apps};
use crate::manifest::Manifest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub installed_apps: Vec<AppEntry>,
    pub manifests: Vec<&'static Manifest>,
}

/// Installed apps plus the manifests of every configured app.
pub async fn meta(State(state): State<AppState>) -> Json<Meta> {
    Json(Meta {
        installed_apps: installed_apps(),
        manifests: state.registry().manifests(),
    })
}
