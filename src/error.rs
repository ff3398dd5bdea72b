use std::io;

/// Failures the frame driver can report.
///
/// Game state is advanced before a frame is presented, so neither variant
/// leaves the entity lists half-updated.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Pushing the framebuffer to the display failed `attempts` times in a row.
    #[error("presentation failure after {attempts} attempt(s): {source}")]
    Presentation {
        attempts: u32,
        #[source]
        source: io::Error,
    },

    /// Every producer of input events has gone away.
    #[error("input event source closed")]
    InputClosed,
}
