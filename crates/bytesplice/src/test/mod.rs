pub mod test_split;
pub mod test_string_lib;

/// Route engine diagnostics to the test harness output; safe to call repeatedly.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Fragments as UTF-8 strings, for readable assertions.
pub(crate) fn strings(fragments: &[crate::ByteString]) -> Vec<String> {
    fragments.iter().map(|f| f.to_string()).collect()
}
