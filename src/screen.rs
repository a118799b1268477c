use anyhow::Result;

/// Somewhere a finished frame can be shown
pub trait Screen {
    /// Replaces whatever is visible with `frame`, one line per `\n`.
    fn show(&mut self, frame: &str) -> Result<()>;
}

impl<S: Screen + ?Sized> Screen for &mut S {
    fn show(&mut self, frame: &str) -> Result<()> {
        (**self).show(frame)
    }
}
