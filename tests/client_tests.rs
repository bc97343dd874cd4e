mod common;

use common::{TEST_UPLOAD_LIMIT, spawn_app};
use shinigami::client::{
    HttpUploadTransport, SelectedFile, UploadController, UploadError, UploadEvent, UploadOptions,
    UploadPhase,
};
use shinigami::common::upload::UploadKind;
use shinigami::modules::auth::model::UserRole;
use std::time::Duration;

async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_controller_uploads_over_http() {
    let app = spawn_app().await;
    let token = app.token_for("staffer", UserRole::Staff).await;
    let base_url = serve(app.app.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("episode.mp4");
    std::fs::write(&path, vec![42u8; 32 * 1024]).unwrap();

    let transport = HttpUploadTransport::new(&base_url).unwrap().with_token(token);
    let (controller, mut events) =
        UploadController::new(transport, UploadKind::EpisodeVideo, UploadOptions::default());
    let mut rx = controller.subscribe();

    controller.select(SelectedFile::from_path(&path).await.unwrap());

    let done = tokio::time::timeout(
        Duration::from_secs(10),
        rx.wait_for(|s| !matches!(s.phase, UploadPhase::Idle | UploadPhase::Uploading)),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();

    let UploadPhase::Completed(asset) = done.phase else {
        panic!("upload did not complete: {:?}", done.phase);
    };
    assert!(asset.filename.starts_with("video-"));
    assert!(asset.filename.ends_with(".mp4"));
    assert_eq!(asset.url, format!("/uploads/{}", asset.filename));
    assert_eq!(app.stored_files(), vec![asset.filename.clone()]);

    let mut last = 0;
    while let Ok(event) = events.try_recv() {
        if let UploadEvent::Progress(p) = event {
            assert!(p >= last);
            last = p;
        }
    }
    assert_eq!(last, 100);
}

#[tokio::test]
async fn test_server_rejection_reaches_the_controller() {
    let app = spawn_app().await;
    let token = app.token_for("viewer", UserRole::User).await;
    let base_url = serve(app.app.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.png");
    std::fs::write(&path, b"png").unwrap();

    let transport = HttpUploadTransport::new(&base_url).unwrap().with_token(token);
    let (controller, _events) =
        UploadController::new(transport, UploadKind::AnimeCover, UploadOptions::default());
    let mut rx = controller.subscribe();

    controller.select(SelectedFile::from_path(&path).await.unwrap());

    let failed = tokio::time::timeout(
        Duration::from_secs(10),
        rx.wait_for(|s| matches!(s.phase, UploadPhase::Error(_))),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();

    assert_eq!(
        failed.phase,
        UploadPhase::Error(UploadError::Rejected {
            status: 403,
            message: "Forbidden: staff or admin access required".to_string(),
        })
    );
    assert!(failed.file.is_some());
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_oversized_file_never_leaves_the_client() {
    let app = spawn_app().await;
    let base_url = serve(app.app.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.mp4");
    std::fs::write(&path, vec![0u8; (TEST_UPLOAD_LIMIT + 1) as usize]).unwrap();

    let options = UploadOptions {
        max_bytes: Some(TEST_UPLOAD_LIMIT),
        ..UploadOptions::default()
    };
    let (controller, _events) = UploadController::new(
        HttpUploadTransport::new(&base_url).unwrap(),
        UploadKind::EpisodeVideo,
        options,
    );

    controller.select(SelectedFile::from_path(&path).await.unwrap());
    assert_eq!(
        controller.snapshot().phase,
        UploadPhase::Error(UploadError::FileTooLarge)
    );
}

async fn upload_until_settled(
    base_url: &str,
    token: String,
    kind: UploadKind,
    path: &std::path::Path,
) -> UploadPhase {
    let transport = HttpUploadTransport::new(base_url).unwrap().with_token(token);
    let options = UploadOptions {
        max_bytes: None,
        ..UploadOptions::default()
    };
    let (controller, _events) = UploadController::new(transport, kind, options);
    let mut rx = controller.subscribe();

    controller.select(SelectedFile::from_path(path).await.unwrap());

    let settled = tokio::time::timeout(
        Duration::from_secs(20),
        rx.wait_for(|s| !matches!(s.phase, UploadPhase::Idle | UploadPhase::Uploading)),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();
    settled.phase
}

#[tokio::test]
async fn test_server_size_limit_reaches_the_controller() {
    let app = spawn_app().await;
    let token = app.token_for("staffer", UserRole::Staff).await;
    let base_url = serve(app.app.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("episode.mp4");
    std::fs::write(&path, vec![1u8; 512 * 1024]).unwrap();

    let phase = upload_until_settled(&base_url, token, UploadKind::EpisodeVideo, &path).await;
    assert_eq!(phase, UploadPhase::Error(UploadError::FileTooLarge));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_early_rejections_of_large_bodies_keep_their_status() {
    let app = spawn_app().await;
    let staff = app.token_for("staffer", UserRole::Staff).await;
    let viewer = app.token_for("viewer", UserRole::User).await;
    let base_url = serve(app.app.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    std::fs::write(&cover, vec![2u8; 900 * 1024]).unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, vec![b'a'; 512 * 1024]).unwrap();

    let phase = upload_until_settled(&base_url, viewer, UploadKind::AnimeCover, &cover).await;
    assert_eq!(
        phase,
        UploadPhase::Error(UploadError::Rejected {
            status: 403,
            message: "Forbidden: staff or admin access required".to_string(),
        })
    );

    let phase = upload_until_settled(&base_url, staff, UploadKind::AnimeCover, &notes).await;
    assert_eq!(
        phase,
        UploadPhase::Error(UploadError::Rejected {
            status: 415,
            message: "Only image and video files are allowed".to_string(),
        })
    );

    assert!(app.stored_files().is_empty());
}
