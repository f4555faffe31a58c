use std::io::{self, Write};

/// Writes one document to stdout. A reader that went away (`| head`) is not
/// an error; anything else is.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    emit(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    emit(&mut io::stdout().lock(), text, true)
}

fn emit(writer: &mut impl Write, text: &str, newline: bool) -> io::Result<()> {
    let written = writer
        .write_all(text.as_bytes())
        .and_then(|()| if newline { writer.write_all(b"\n") } else { Ok(()) })
        .and_then(|()| writer.flush());
    reader_gone_is_ok(written)
}

fn reader_gone_is_ok(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
