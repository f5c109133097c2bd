use log::info;

use landing_frontend::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting landing page behaviors");
    if let Err(e) = landing_frontend::start() {
        log::error!("Landing page behaviors not started: {}", e);
    }
}
