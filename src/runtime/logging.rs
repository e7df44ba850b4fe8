use log::LevelFilter;

use crate::config::Settings;

pub fn init(settings: &Settings) {
    let level = settings.log_level().unwrap_or(LevelFilter::Info);
    let mut clog = colog::default_builder();
    clog.filter(None, level);
    clog.init();

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));
}
