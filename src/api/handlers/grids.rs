use axum::extract::{Multipart, State};
use futures::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::{error, info};

use crate::AppState;
use crate::api::error::AppError;
use crate::models::GridRole;

#[utoipa::path(
    post,
    path = "/uploadSrc",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload accepted, body is the literal text `success`", body = String),
        (status = 400, description = "Malformed multipart body")
    ),
    tag = "grids"
)]
pub async fn upload_src(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<&'static str, AppError> {
    upload_grid(state, GridRole::Source, multipart).await
}

#[utoipa::path(
    post,
    path = "/uploadTrg",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload accepted, body is the literal text `success`", body = String),
        (status = 400, description = "Malformed multipart body")
    ),
    tag = "grids"
)]
pub async fn upload_trg(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<&'static str, AppError> {
    upload_grid(state, GridRole::Target, multipart).await
}

/// Stream every file part into the role's canonical slot and kick off a
/// surface conversion for each completed rename.
///
/// The `success` response only acknowledges that the form body was parsed;
/// conversion runs detached and reports through the log. Two concurrent
/// uploads to the same role race benignly: the last rename wins the
/// canonical name.
async fn upload_grid(
    state: AppState,
    role: GridRole,
    mut multipart: Multipart,
) -> Result<&'static str, AppError> {
    while let Some(field) = multipart.next_field().await? {
        // text fields carry no filename and are not grid data
        let Some(client_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let reader = StreamReader::new(field.map_err(std::io::Error::other));
        let (canonical, written) = state.storage.save_grid(role, reader).await?;
        info!(
            "File received: {} ({} bytes, client name {:?})",
            canonical.display(),
            written,
            client_name
        );

        let tool = state.tool.clone();
        let out_dir = state.storage.root().to_path_buf();
        tokio::spawn(async move {
            match tool
                .convert_to_surface(&canonical, &out_dir, role.surface_tag())
                .await
            {
                Ok(out) => info!("{}", out.stdout),
                Err(e) => error!(
                    "surface conversion failed for {}: {}",
                    canonical.display(),
                    e
                ),
            }
        });
    }

    Ok("success")
}

#[utoipa::path(
    get,
    path = "/srcGrdStats",
    responses(
        (status = 200, description = "Statistics of the source grid, tool stdout verbatim", body = String),
        (status = 500, description = "Tool failure, body carries the error")
    ),
    tag = "grids"
)]
pub async fn src_grid_stats(State(state): State<AppState>) -> Result<String, AppError> {
    info!("Source grid statistics request received");

    let grid = state.storage.canonical_path(GridRole::Source);
    let out = state.tool.compute_statistics(&grid).await?;
    info!("{}", out.stdout);
    Ok(out.stdout)
}

#[utoipa::path(
    get,
    path = "/slnTransfer",
    responses(
        (status = 200, description = "Solution transfer report, tool stdout verbatim", body = String),
        (status = 500, description = "Tool failure, body carries the error")
    ),
    tag = "grids"
)]
pub async fn sln_transfer(State(state): State<AppState>) -> Result<String, AppError> {
    info!("Solution transfer request received");

    let source = state.storage.canonical_path(GridRole::Source);
    let target = state.storage.canonical_path(GridRole::Target);
    let out = state.tool.transfer_solution(&source, &target).await?;
    info!("{}", out.stdout);
    Ok(out.stdout)
}
