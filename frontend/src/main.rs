use leptos::prelude::*;
use scholars_frontend::App;
use scholars_frontend::config::AppConfig;
use scholars_frontend::logger;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    logger::init(config.log_level);
    log::info!("starting Solution Scholars, api at {}", config.api_base_url);

    mount_to_body(App);
}
