use pixmorph::{ConversationId, OutputSink};
use std::io::{self, Write};
use std::path::PathBuf;

/// Prints text replies and saves image replies as numbered JPEG files
pub struct TerminalSink<W: Write> {
    out: W,
    output_dir: PathBuf,
    images_written: usize,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            out,
            output_dir: output_dir.into(),
            images_written: 0,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn image_path(&self, conversation: &ConversationId) -> PathBuf {
        let stem: String = conversation
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.output_dir
            .join(format!("{}-{}.jpg", stem, self.images_written + 1))
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    type Error = io::Error;

    fn deliver_text(&mut self, _conversation: &ConversationId, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn deliver_image(&mut self, conversation: &ConversationId, bytes: &[u8]) -> io::Result<()> {
        let path = self.image_path(conversation);
        std::fs::write(&path, bytes)?;
        self.images_written += 1;
        log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        writeln!(self.out, "[image saved to {}]", path.display())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_goes_to_writer() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TerminalSink::new(Vec::new(), dir.path());
        sink.deliver_text(&ConversationId::from("c"), "hello").unwrap();
        assert_eq!(sink.into_inner(), b"hello\n");
    }

    #[test]
    fn test_images_are_numbered_per_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TerminalSink::new(Vec::new(), dir.path());
        let chat = ConversationId::from("chat/1");

        sink.deliver_image(&chat, b"one").unwrap();
        sink.deliver_image(&chat, b"two").unwrap();

        assert_eq!(std::fs::read(dir.path().join("chat_1-1.jpg")).unwrap(), b"one");
        assert_eq!(std::fs::read(dir.path().join("chat_1-2.jpg")).unwrap(), b"two");
        let printed = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(printed.lines().count(), 2);
    }
}
