use leptos::logging::log;
use leptos::prelude::*;
use mentorlink_frontend::App;

// lol_alloc keeps the WASM binary small
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    // panic 信息输出到浏览器控制台
    console_error_panic_hook::set_once();
    log!("[App] Mounting MentorLink client.");
    mount_to_body(App);
}
