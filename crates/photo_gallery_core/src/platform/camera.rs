//! Camera capability fed by the hosting shell.
//!
//! The shell owns the real camera UI. It stages the capture result here and
//! then asks the core to save it; an empty stage reads as a cancelled capture.

use super::{Camera, CameraOptions, CameraSource, PlatformError, PlatformResult};
use crate::model::photo::CapturedPhoto;
use log::debug;
use std::sync::{Arc, Mutex};

/// Single-slot camera. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct PendingCapture {
    slot: Arc<Mutex<Option<CapturedPhoto>>>,
}

impl PendingCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages one capture result, replacing any earlier unconsumed one.
    pub fn stage(&self, photo: CapturedPhoto) -> PlatformResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| PlatformError::Io("pending capture slot poisoned".to_string()))?;
        if slot.replace(photo).is_some() {
            debug!("event=capture_stage module=camera status=ok replaced=true");
        }
        Ok(())
    }

    /// Drops any staged result.
    pub fn clear(&self) -> PlatformResult<()> {
        self.slot
            .lock()
            .map_err(|_| PlatformError::Io("pending capture slot poisoned".to_string()))?
            .take();
        Ok(())
    }

    pub fn is_staged(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl Camera for PendingCapture {
    fn capture(&self, options: &CameraOptions) -> PlatformResult<CapturedPhoto> {
        if options.source != CameraSource::Camera {
            return Err(PlatformError::Unavailable(
                "only the physical camera source is supported".to_string(),
            ));
        }
        self.slot
            .lock()
            .map_err(|_| PlatformError::Io("pending capture slot poisoned".to_string()))?
            .take()
            .ok_or(PlatformError::Cancelled)
    }
}
