//! 文件选择读取

use js_sys::Uint8Array;
use leptos::logging::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

use crate::error::{ClientError, ClientResult};

/// 从 `<input type="file">` 的 change 事件中取出第一个文件
pub fn selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// 读取文件的全部字节
pub async fn read_bytes(file: &File) -> ClientResult<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(|e| {
        warn!("[File] Reading {} failed: {:?}", file.name(), e);
        ClientError::validation("Could not read the selected image.")
    })?;
    Ok(Uint8Array::new(&buffer).to_vec())
}
