//! Hands the selected video over to the system browser.

use {anyhow::Result, tracing::info};

use crate::{error::ResultExt, video::url::VideoId};

/// Opens a video's watch page.
pub trait VideoLauncher: Send + Sync {
    /// Opens `video`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page could not be handed to the system.
    fn open(&self, video: &VideoId) -> Result<()>;
}

/// Opens videos with the desktop's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLauncher;

impl VideoLauncher for BrowserLauncher {
    fn open(&self, video: &VideoId) -> Result<()> {
        let url = video.watch_url();
        open::that_detached(&url).add_contextf(format!("Opening {url} in the browser"))?;
        info!("Opened video {video} in the browser");
        Ok(())
    }
}
