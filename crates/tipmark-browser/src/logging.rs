//! Console logging.

/// Install a console tracing subscriber. Safe to call more than once; only
/// the first call takes effect.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn init_logging() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// No-op on non-WASM targets.
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn init_logging() {}
