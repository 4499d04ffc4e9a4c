
use crate::context::TransformContext;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn create_context(source: &str) -> TransformContext {
    init_tracing();
    TransformContext::new("file.js", source).expect("Failed to parse")
}
