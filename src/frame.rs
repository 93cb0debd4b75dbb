use std::io;
use std::process::{Child, Command, Stdio};

/// Opaque surface that hosts third-party game content addressed by a URL.
///
/// The contract is deliberately narrow: content can be mounted and
/// unmounted, nothing else. The application never inspects what happens
/// inside the frame, and a mount failure carries no retry obligation.
pub trait EmbeddedFrame {
    /// Load the given URL into the frame. `title` is a display label for
    /// viewers that can show one; implementations may ignore it.
    fn mount(&mut self, url: &str, title: &str) -> io::Result<()>;

    /// Release whatever the frame is currently showing, stopping any
    /// background audio or video. Unmounting an empty frame is a no-op.
    fn unmount(&mut self);

    /// Short human-readable name of the hosting viewer, for the overlay.
    fn label(&self) -> &str;
}

/// Frame implementation that hands the URL to an external viewer process.
///
/// `unmount` kills and reaps the child if it is still running. The default
/// platform opener hands the URL off and exits almost immediately, in which
/// case unmounting degrades to reaping it; pass `--player` with a viewer
/// that stays in the foreground (a kiosk browser, mpv) to get real unload
/// behavior.
pub struct ViewerFrame {
    command: Vec<String>,
    label: String,
    child: Option<Child>,
}

impl ViewerFrame {
    /// Build a frame around a viewer command line (program plus fixed args);
    /// the URL is appended on every mount.
    pub fn new(command: Vec<String>) -> Self {
        let label = command
            .first()
            .cloned()
            .unwrap_or_else(|| "viewer".to_string());
        ViewerFrame {
            command,
            label,
            child: None,
        }
    }

    /// The platform's default URL opener.
    pub fn platform_default() -> Self {
        let command: Vec<String> = if cfg!(target_os = "macos") {
            vec!["open".to_string()]
        } else if cfg!(target_os = "windows") {
            ["cmd", "/c", "start", ""].iter().map(|s| s.to_string()).collect()
        } else {
            vec!["xdg-open".to_string()]
        };
        Self::new(command)
    }
}

impl EmbeddedFrame for ViewerFrame {
    fn mount(&mut self, url: &str, _title: &str) -> io::Result<()> {
        self.unmount();

        let Some((program, args)) = self.command.split_first() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty viewer command",
            ));
        };

        let child = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        self.child = Some(child);
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for ViewerFrame {
    fn drop(&mut self) {
        self.unmount();
    }
}
