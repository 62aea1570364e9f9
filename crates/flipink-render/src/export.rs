//! Rendering the timeline to stills and handing them to a video encoder.

use crate::renderer::Renderer;
use crate::surface::Surface;
use flipink_core::{EditorSession, EncodeRequest, ExportError, ExportResult, VideoEncoder};

/// Render every frame, in timeline order, to PNG on a white background.
///
/// The session is only borrowed, so the current frame index is untouched.
/// `surface` is repainted with the session's view before returning, whether
/// or not capture succeeded.
pub fn capture_frames<S: Surface + ?Sized>(
    session: &EditorSession,
    renderer: &Renderer,
    surface: &mut S,
) -> ExportResult<Vec<Vec<u8>>> {
    let frames = session.timeline().frames();
    if frames.is_empty() {
        return Err(ExportError::NoFrames);
    }

    let captured = frames
        .iter()
        .enumerate()
        .map(|(index, strokes)| {
            renderer.render_frame(surface, strokes);
            surface.encode_png().map_err(|e| ExportError::Render {
                index,
                message: e.to_string(),
            })
        })
        .collect();

    renderer.render(surface, &session.view());
    captured
}

/// Capture all frames and pair them with the configured frame rate.
pub fn prepare_export<S: Surface + ?Sized>(
    session: &EditorSession,
    renderer: &Renderer,
    surface: &mut S,
) -> ExportResult<EncodeRequest> {
    let frames = capture_frames(session, renderer, surface)?;
    Ok(EncodeRequest {
        frames,
        fps: session.config().export_fps,
    })
}

/// Send captured frames to the encoder.
pub async fn encode_video<E: VideoEncoder + ?Sized>(
    encoder: &E,
    request: EncodeRequest,
) -> ExportResult<Vec<u8>> {
    log::info!("Exporting {} frames at {} fps", request.frames.len(), request.fps);
    match encoder.encode(&request).await {
        Ok(video) => {
            log::info!("Export finished: {} bytes", video.len());
            Ok(video)
        }
        Err(e) => {
            log::warn!("Export failed: {}", e);
            Err(e)
        }
    }
}

/// Render and encode the whole timeline.
///
/// Holds a shared borrow of the session until the encoder answers; use
/// [`prepare_export`] and [`encode_video`] to keep editing while it runs.
pub async fn export_video<S, E>(
    session: &EditorSession,
    renderer: &Renderer,
    surface: &mut S,
    encoder: &E,
) -> ExportResult<Vec<u8>>
where
    S: Surface + ?Sized,
    E: VideoEncoder + ?Sized,
{
    let request = prepare_export(session, renderer, surface)?;
    encode_video(encoder, request).await
}
