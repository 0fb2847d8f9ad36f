/// Commands the UI layer can send to the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// Start button. Also used to restart after completion.
    Start,
    /// Re-issue the current step's fetch after a failure.
    Retry,
    /// Viewport size, read by the host when it changes or before a render.
    Viewport { width: f32, height: f32 },
}

/// A queue of app commands.
/// JS pushes commands from event handlers; Rust drains them at the next frame.
pub struct CommandQueue {
    commands: Vec<AppCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, command: AppCommand) {
        self.commands.push(command);
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<AppCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
