use exit_inference::DetectionRecord;
use log::debug;

/// Receives every detection of an analyzed frame for drawing.
pub trait OverlaySink: Send + Sync {
    fn render(&self, detections: &[DetectionRecord], frame_width: u32, frame_height: u32);
}

/// A detection box mapped into view coordinates, with its caption.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub caption: String,
}

impl OverlayBox {
    /// Scales labelled detections from frame pixels into a `view_width` x `view_height`
    /// surface. Unlabelled detections are not drawn.
    pub fn layout(
        detections: &[DetectionRecord],
        frame_width: u32,
        frame_height: u32,
        view_width: u32,
        view_height: u32,
    ) -> Vec<OverlayBox> {
        if frame_width == 0 || frame_height == 0 {
            return Vec::new();
        }

        let scale_x = view_width as f32 / frame_width as f32;
        let scale_y = view_height as f32 / frame_height as f32;

        detections
            .iter()
            .filter_map(|detection| {
                let label = detection.top_label()?;
                let bbox = &detection.bounding_box;
                Some(OverlayBox {
                    left: bbox.left as f32 * scale_x,
                    top: bbox.top as f32 * scale_y,
                    right: bbox.right as f32 * scale_x,
                    bottom: bbox.bottom as f32 * scale_y,
                    caption: format!("{} {}%", label.text, label.percent()),
                })
            })
            .collect()
    }
}

/// Overlay sink for headless runs: logs what would be drawn.
pub struct LogOverlay {
    view_width: u32,
    view_height: u32,
}

impl LogOverlay {
    pub fn new(view_width: u32, view_height: u32) -> Self {
        Self {
            view_width,
            view_height,
        }
    }
}

impl OverlaySink for LogOverlay {
    fn render(&self, detections: &[DetectionRecord], frame_width: u32, frame_height: u32) {
        let boxes = OverlayBox::layout(
            detections,
            frame_width,
            frame_height,
            self.view_width,
            self.view_height,
        );
        for overlay in &boxes {
            debug!(
                "Overlay {} at ({:.0}, {:.0})-({:.0}, {:.0})",
                overlay.caption, overlay.left, overlay.top, overlay.right, overlay.bottom
            );
        }
    }
}
