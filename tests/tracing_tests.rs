//! The frontend explains its lookahead decisions through `tracing`.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory log sink.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn lookahead_decisions_and_failures_are_traced() {
    let sink = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("kpl_syntax=trace"))
        .with_writer(sink.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let source = "code M\n  function f()\n    var a: int b: int\n    a = b\n    *p = a * 2\n    for (a = 0 ; a < 1 ; a = a + 1) endFor\n  endFunction\nendCode\n";
        kpl::parse_source(source).unwrap();
        assert!(kpl::parse_source("code M endIf").is_err());
    });

    let logs = sink.contents();
    assert!(logs.contains("declarator boundary"), "{logs}");
    assert!(logs.contains("`*` placement"), "{logs}");
    assert!(logs.contains("`for` form"), "{logs}");
    assert!(logs.contains("parsing failed"), "{logs}");
}
